pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::cache::ResourceKind;
use crate::models::courses::requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest};
use crate::services::resource_cache;

storage_service!(CourseService);

impl CourseService {
    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course_data).await
    }

    pub async fn get_course(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        detail::get_course(self, request, course_id).await
    }

    pub async fn update_course(
        &self,
        request: &HttpRequest,
        update_data: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, update_data).await
    }

    pub async fn delete_course(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request).await
    }
}

/// 课程结构变化后清除大纲缓存
pub(crate) async fn invalidate_course_cache(request: &HttpRequest, course_id: i64) {
    if let Some(cache) = resource_cache(request) {
        cache.invalidate(ResourceKind::CourseOutline, course_id).await;
        cache.invalidate(ResourceKind::Course, course_id).await;
    }
}
