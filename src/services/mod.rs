/// 定义只持有存储句柄的服务结构体
macro_rules! storage_service {
    ($name:ident) => {
        pub struct $name {
            storage: Option<std::sync::Arc<dyn crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> actix_web::Result<std::sync::Arc<dyn crate::storage::Storage>> {
                match &self.storage {
                    Some(storage) => Ok(storage.clone()),
                    None => crate::services::storage_from_request(request),
                }
            }
        }
    };
}

pub mod assignments;
pub mod auth;
pub mod billing;
pub mod certificates;
pub mod courses;
pub mod enrollments;
pub mod forums;
pub mod lessons;
pub mod mentorship;
pub mod modules;
pub mod notifications;
pub mod quizzes;
pub mod submissions;
pub mod system;
pub mod users;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use billing::BillingService;
pub use certificates::CertificateService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use forums::ForumService;
pub use lessons::LessonService;
pub use mentorship::MentorshipService;
pub use modules::ModuleService;
pub use notifications::NotificationService;
pub use quizzes::QuizService;
pub use submissions::SubmissionService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, error::InternalError, web};
use std::sync::Arc;
use tracing::{debug, error};

use crate::cache::{ResourceCache, ResourceKind};
use crate::middlewares::{CourseAccess, RequireCourseAccess, RequireJWT};
use crate::models::{ApiResponse, ErrorCode, courses::entities::Course, users::entities::User};
use crate::storage::Storage;

fn fail(status: HttpResponse, reason: &'static str) -> actix_web::Error {
    InternalError::from_response(reason, status).into()
}

/// 从应用数据中取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not registered in app data");
            fail(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Storage unavailable",
                )),
                "storage unavailable",
            )
        })
}

/// 资源缓存可选，未注册时直接读库
pub(crate) fn resource_cache(request: &HttpRequest) -> Option<ResourceCache> {
    request
        .app_data::<web::Data<ResourceCache>>()
        .map(|c| c.get_ref().clone())
}

/// 用户被修改或删除后清除 RequireJWT 使用的缓存
pub(crate) async fn invalidate_user_cache(request: &HttpRequest, user_id: i64) {
    if let Some(cache) = resource_cache(request) {
        let evicted = cache.invalidate(ResourceKind::User, user_id).await;
        debug!("User {} cache eviction: {}", user_id, evicted);
    }
}

/// 当前登录用户，须位于 RequireJWT 之后
pub(crate) fn current_user(request: &HttpRequest) -> ActixResult<User> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        fail(
            HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )),
            "unauthenticated",
        )
    })
}

/// RequireCourseAccess 写入的课程与访问关系
pub(crate) fn course_context(request: &HttpRequest) -> ActixResult<(Course, CourseAccess)> {
    match (
        RequireCourseAccess::extract_course(request),
        RequireCourseAccess::extract_access(request),
    ) {
        (Some(course), Some(access)) => Ok((course, access)),
        _ => {
            error!("Course context missing, is RequireCourseAccess mounted?");
            Err(fail(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Course context unavailable",
                )),
                "course context unavailable",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    #[::core::prelude::v1::test]
    fn test_missing_app_data_is_reported() {
        let req = test::TestRequest::default().to_http_request();
        let err = storage_from_request(&req).err().unwrap();
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(resource_cache(&req).is_none());
    }

    #[::core::prelude::v1::test]
    fn test_current_user_requires_authentication() {
        let req = test::TestRequest::default().to_http_request();
        let err = current_user(&req).err().unwrap();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }
}
