use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;

use super::EnrollmentService;
use crate::models::{
    ApiResponse,
    common::response::internal_error,
    enrollments::{
        entities::{EnrollmentStatus, RosterEntry},
        requests::RosterListParams,
    },
};
use crate::services::course_context;
use crate::utils::csv_export::{csv_attachment, to_csv};

pub async fn list_roster(
    service: &EnrollmentService,
    request: &HttpRequest,
    params: RosterListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    match storage
        .list_course_roster(course.id, params.pagination, params.status)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Roster retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list roster", e)),
    }
}

// 导出行，CSV 不支持嵌套结构
#[derive(Debug, Serialize)]
struct RosterExportRow {
    user_id: i64,
    username: String,
    display_name: String,
    email: String,
    status: EnrollmentStatus,
    enrolled_at: String,
    completed_at: Option<String>,
}

impl From<RosterEntry> for RosterExportRow {
    fn from(entry: RosterEntry) -> Self {
        Self {
            user_id: entry.enrollment.user_id,
            username: entry.username,
            display_name: entry.display_name,
            email: entry.email,
            status: entry.enrollment.status,
            enrolled_at: entry.enrollment.enrolled_at.to_rfc3339(),
            completed_at: entry.enrollment.completed_at.map(|t| t.to_rfc3339()),
        }
    }
}

pub async fn export_roster(
    service: &EnrollmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    let rows: Vec<RosterExportRow> = match storage.list_course_roster_all(course.id).await {
        Ok(entries) => entries.into_iter().map(RosterExportRow::from).collect(),
        Err(e) => return Ok(internal_error("Failed to export roster", e)),
    };

    match to_csv(&rows) {
        Ok(body) => Ok(csv_attachment(&format!("{}-roster.csv", course.slug), body)),
        Err(e) => Ok(internal_error("Failed to export roster", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enrollments::entities::Enrollment;

    #[test]
    fn test_roster_rows_flatten_to_csv() {
        let now = chrono::Utc::now();
        let entry = RosterEntry {
            enrollment: Enrollment {
                id: 1,
                user_id: 9,
                course_id: 2,
                status: EnrollmentStatus::Active,
                enrolled_at: now,
                completed_at: None,
            },
            username: "alice".into(),
            email: "alice@example.com".into(),
            display_name: "Alice".into(),
        };
        let csv = String::from_utf8(to_csv(&[RosterExportRow::from(entry)]).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("user_id,username,display_name,email,status,enrolled_at,completed_at")
        );
        assert!(lines.next().unwrap().starts_with("9,alice,Alice,alice@example.com,active,"));
    }
}
