use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::CourseService;
use crate::cache::ResourceKind;
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::internal_error,
    courses::entities::CourseOutline,
    users::entities::UserRole,
};
use crate::services::{current_user, resource_cache};

/// 课程详情与大纲，经资源缓存读取
pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let cache = resource_cache(request);

    let cached = match &cache {
        Some(cache) => cache.get::<CourseOutline>(ResourceKind::CourseOutline, course_id).await,
        None => None,
    };

    let outline = match cached {
        Some(outline) => {
            debug!("Course outline {} served from cache", course_id);
            outline
        }
        None => match storage.get_course_outline(course_id).await {
            Ok(Some(outline)) => {
                if let Some(cache) = &cache {
                    cache.set(ResourceKind::CourseOutline, course_id, &outline).await;
                }
                outline
            }
            Ok(None) => return Ok(not_found()),
            Err(e) => return Ok(internal_error("Failed to load course", e)),
        },
    };

    // 未发布的课程只对讲师本人与管理员可见
    let is_staff = user.role == UserRole::Admin || outline.course.instructor_id == user.id;
    if !outline.course.is_published() && !is_staff {
        return Ok(not_found());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(outline, "Course retrieved successfully")))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::CourseNotFound,
        "Course not found",
    ))
}
