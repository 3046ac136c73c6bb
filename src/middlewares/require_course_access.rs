/*!
 * 课程访问控制中间件
 *
 * 必须在 RequireJWT 之后使用。根据路径中的 `{course_id}` 解析当前用户与课程的关系：
 * 管理员、课程讲师（所有者）或已选课学员。都不满足时返回 403，课程不存在返回 404。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use crate::middlewares::{RequireCourseAccess, RequireJWT};
 *
 * web::resource("/api/v1/courses/{course_id}/modules")
 *     .route(web::get().to(list_modules))
 *     .wrap(RequireCourseAccess::any())
 *     .wrap(RequireJWT)
 * ```
 *
 * 只允许课程管理者（讲师本人或管理员）时使用 `RequireCourseAccess::staff()`。
 * 通过校验后，`CourseAccess` 与 `Course` 写入请求扩展。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{error, info};

use crate::cache::{ResourceCache, ResourceKind};
use crate::errors::Result;
use crate::models::{
    ErrorCode,
    courses::entities::Course,
    users::entities::{User, UserRole},
};
use crate::storage::Storage;

use super::create_error_response;

/// 当前用户与课程的关系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseAccess {
    Admin,
    Owner,
    Enrolled,
}

impl CourseAccess {
    /// 讲师本人或管理员
    pub fn is_staff(&self) -> bool {
        matches!(self, CourseAccess::Admin | CourseAccess::Owner)
    }
}

/// 解析用户与课程的关系，没有任何关系时返回 None
pub async fn resolve_course_access(
    storage: &Arc<dyn Storage>,
    user: &User,
    course: &Course,
) -> Result<Option<CourseAccess>> {
    if user.role == UserRole::Admin {
        return Ok(Some(CourseAccess::Admin));
    }
    if course.instructor_id == user.id {
        return Ok(Some(CourseAccess::Owner));
    }
    let enrolled = storage.get_enrollment(user.id, course.id).await?.is_some();
    Ok(enrolled.then_some(CourseAccess::Enrolled))
}

/// 课程先查资源缓存，课程更新或删除时由课程服务失效
async fn load_course(
    req: &ServiceRequest,
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<Option<Course>> {
    let cache = req
        .app_data::<web::Data<ResourceCache>>()
        .map(|c| c.get_ref().clone());
    if let Some(cache) = &cache
        && let Some(course) = cache.get::<Course>(ResourceKind::Course, course_id).await
    {
        return Ok(Some(course));
    }

    let course = storage.get_course_by_id(course_id).await?;
    if let (Some(cache), Some(course)) = (&cache, &course) {
        cache.set(ResourceKind::Course, course_id, course).await;
    }
    Ok(course)
}

#[derive(Clone)]
pub struct RequireCourseAccess {
    staff_only: bool,
}

impl RequireCourseAccess {
    /// 管理员、讲师本人或已选课学员
    pub fn any() -> Self {
        Self { staff_only: false }
    }

    /// 仅讲师本人或管理员
    pub fn staff() -> Self {
        Self { staff_only: true }
    }

    pub fn extract_access(req: &HttpRequest) -> Option<CourseAccess> {
        req.extensions().get::<CourseAccess>().copied()
    }

    pub fn extract_course(req: &HttpRequest) -> Option<Course> {
        req.extensions().get::<Course>().cloned()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireCourseAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireCourseAccessMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireCourseAccessMiddleware {
            service: Rc::new(service),
            staff_only: self.staff_only,
        }))
    }
}

pub struct RequireCourseAccessMiddleware<S> {
    service: Rc<S>,
    staff_only: bool,
}

impl<S, B> Service<ServiceRequest> for RequireCourseAccessMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let staff_only = self.staff_only;

        Box::pin(async move {
            macro_rules! reject {
                ($status:expr, $code:expr, $msg:expr) => {
                    return Ok(req.into_response(
                        create_error_response($status, $code, $msg).map_into_right_body(),
                    ))
                };
            }

            // 1. 当前用户
            let Some(user) = req.extensions().get::<User>().cloned() else {
                reject!(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "Authentication required"
                );
            };

            // 2. 路径中的课程 ID
            let Some(course_id) = req
                .match_info()
                .get("course_id")
                .and_then(|s| s.parse::<i64>().ok())
                .filter(|id| *id > 0)
            else {
                reject!(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::BadRequest,
                    "Missing or invalid course_id"
                );
            };

            let Some(storage) = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .map(|s| s.get_ref().clone())
            else {
                error!("Storage not registered in app data");
                reject!(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    "Internal server error"
                );
            };

            // 3. 课程存在性
            let course = match load_course(&req, &storage, course_id).await {
                Ok(Some(course)) => course,
                Ok(None) => {
                    reject!(
                        StatusCode::NOT_FOUND,
                        ErrorCode::CourseNotFound,
                        "Course not found"
                    );
                }
                Err(e) => {
                    error!("Failed to load course {}: {}", course_id, e);
                    reject!(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::InternalServerError,
                        "Internal server error"
                    );
                }
            };

            // 4. 用户与课程的关系
            let access = match resolve_course_access(&storage, &user, &course).await {
                Ok(access) => access,
                Err(e) => {
                    error!("Failed to resolve course access: {}", e);
                    reject!(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::InternalServerError,
                        "Internal server error"
                    );
                }
            };

            match access {
                Some(access) if !staff_only || access.is_staff() => {
                    req.extensions_mut().insert(access);
                    req.extensions_mut().insert(course);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                _ => {
                    info!(
                        "Course access denied for user {} on course {} (staff_only: {})",
                        user.id, course_id, staff_only
                    );
                    reject!(
                        StatusCode::FORBIDDEN,
                        ErrorCode::CoursePermissionDenied,
                        "No permission for this course"
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_access() {
        assert!(CourseAccess::Admin.is_staff());
        assert!(CourseAccess::Owner.is_staff());
        assert!(!CourseAccess::Enrolled.is_staff());
    }
}
