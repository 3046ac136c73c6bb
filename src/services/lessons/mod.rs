pub mod detail;
pub mod manage;
pub mod progress;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    common::response::internal_error,
    courses::{
        entities::CourseModule,
        requests::{CreateLessonRequest, ReorderRequest, UpdateLessonRequest},
    },
};
use crate::storage::Storage;

storage_service!(LessonService);

impl LessonService {
    pub async fn list_lessons(
        &self,
        request: &HttpRequest,
        module_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::list_lessons(self, request, module_id).await
    }

    pub async fn create_lesson(
        &self,
        request: &HttpRequest,
        module_id: i64,
        lesson_data: CreateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_lesson(self, request, module_id, lesson_data).await
    }

    pub async fn get_lesson(
        &self,
        request: &HttpRequest,
        course_id: i64,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_lesson(self, request, course_id, lesson_id).await
    }

    pub async fn update_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
        update_data: UpdateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_lesson(self, request, lesson_id, update_data).await
    }

    pub async fn delete_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_lesson(self, request, lesson_id).await
    }

    pub async fn reorder_lessons(
        &self,
        request: &HttpRequest,
        module_id: i64,
        reorder: ReorderRequest,
    ) -> ActixResult<HttpResponse> {
        manage::reorder_lessons(self, request, module_id, reorder).await
    }

    // 标记课时完成
    pub async fn complete_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        progress::complete_lesson(self, request, lesson_id).await
    }

    pub async fn get_progress(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        progress::get_progress(self, request).await
    }
}

/// 章节必须属于当前课程，否则返回 404 响应
pub(crate) async fn load_module(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    module_id: i64,
) -> Result<CourseModule, HttpResponse> {
    match storage.get_module(course_id, module_id).await {
        Ok(Some(module)) => Ok(module),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ModuleNotFound,
            "Module not found",
        ))),
        Err(e) => Err(internal_error("Failed to load module", e)),
    }
}

pub(crate) fn lesson_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::LessonNotFound,
        "Lesson not found",
    ))
}
