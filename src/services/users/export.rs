//! 用户导出服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;

use super::UserService;
use crate::models::common::response::internal_error;
use crate::models::users::entities::User;
use crate::utils::{csv_attachment, to_csv};

#[derive(Debug, Serialize)]
struct UserExportRow<'a> {
    id: i64,
    username: &'a str,
    email: &'a str,
    role: String,
    status: String,
    display_name: &'a str,
    last_login: Option<String>,
    created_at: String,
}

impl<'a> From<&'a User> for UserExportRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id,
            username: &user.username,
            email: &user.email,
            role: user.role.to_string(),
            status: user.status.to_string(),
            display_name: &user.profile.display_name,
            last_login: user.last_login.map(|t| t.to_rfc3339()),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// 导出全部用户
pub async fn export_users(service: &UserService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let users = match storage.list_all_users().await {
        Ok(users) => users,
        Err(e) => return Ok(internal_error("Failed to export users", e)),
    };

    let rows: Vec<UserExportRow> = users.iter().map(UserExportRow::from).collect();
    match to_csv(&rows) {
        Ok(body) => Ok(csv_attachment("users.csv", body)),
        Err(e) => Ok(internal_error("Failed to export users", e)),
    }
}
