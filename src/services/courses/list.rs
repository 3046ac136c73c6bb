use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{
    ApiResponse,
    common::response::internal_error,
    courses::{
        entities::CourseStatus,
        requests::{CourseListParams, CourseListQuery},
    },
    users::entities::UserRole,
};
use crate::services::current_user;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let mut list_query = CourseListQuery {
        page: query.page,
        size: query.size,
        search: query.search,
        category: query.category,
        level: query.level,
        ..Default::default()
    };

    if query.mine.unwrap_or(false) {
        // 讲师与管理员看自己创建的课程（含草稿），其余角色看已选课程
        match user.role {
            UserRole::Instructor | UserRole::Admin => list_query.instructor_id = Some(user.id),
            UserRole::Student | UserRole::Mentor => list_query.enrolled_user_id = Some(user.id),
        }
    } else {
        list_query.status = Some(CourseStatus::Published);
    }

    match storage.list_courses_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Course list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve course list", e)),
    }
}
