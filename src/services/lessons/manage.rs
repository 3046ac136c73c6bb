use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{LessonService, lesson_not_found, load_module};
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::{internal_error, storage_error_response},
    courses::{
        entities::LessonContentType,
        requests::{CreateLessonRequest, ReorderRequest, UpdateLessonRequest},
        responses::{LessonListResponse, ReorderResponse},
    },
};
use crate::services::{course_context, courses::invalidate_course_cache};
use crate::utils::validate::validate_text;

const MAX_TITLE_LEN: usize = 200;

fn validate_lesson_fields(
    title: Option<&str>,
    content_type: Option<LessonContentType>,
    video_url: Option<&str>,
    duration_minutes: Option<i32>,
) -> Result<(), String> {
    if let Some(title) = title {
        validate_text("title", title, MAX_TITLE_LEN)?;
    }
    if matches!(content_type, Some(LessonContentType::Video))
        && video_url.is_none_or(|url| url.trim().is_empty())
    {
        return Err("Video lessons require a video_url".into());
    }
    if let Some(minutes) = duration_minutes
        && minutes < 0
    {
        return Err("Duration must not be negative".into());
    }
    Ok(())
}

pub async fn list_lessons(
    service: &LessonService,
    request: &HttpRequest,
    module_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Err(response) = load_module(&storage, course.id, module_id).await {
        return Ok(response);
    }

    match storage.list_lessons(module_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            LessonListResponse { items },
            "Lesson list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list lessons", e)),
    }
}

pub async fn create_lesson(
    service: &LessonService,
    request: &HttpRequest,
    module_id: i64,
    lesson_data: CreateLessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Err(msg) = validate_lesson_fields(
        Some(&lesson_data.title),
        lesson_data.content_type,
        lesson_data.video_url.as_deref(),
        lesson_data.duration_minutes,
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    if let Err(response) = load_module(&storage, course.id, module_id).await {
        return Ok(response);
    }

    match storage.create_lesson(course.id, module_id, lesson_data).await {
        Ok(lesson) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(lesson, "Lesson created")))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ValidationFailed)),
    }
}

pub async fn update_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_id: i64,
    update_data: UpdateLessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    let existing = match storage.get_lesson(course.id, lesson_id).await {
        Ok(Some(lesson)) => lesson,
        Ok(None) => return Ok(lesson_not_found()),
        Err(e) => return Ok(internal_error("Failed to load lesson", e)),
    };

    // 类型与视频地址合并后再校验
    let content_type = update_data.content_type.unwrap_or(existing.content_type);
    let video_url = update_data
        .video_url
        .as_deref()
        .or(existing.video_url.as_deref());
    if let Err(msg) = validate_lesson_fields(
        update_data.title.as_deref(),
        Some(content_type),
        video_url,
        update_data.duration_minutes,
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage.update_lesson(course.id, lesson_id, update_data).await {
        Ok(Some(lesson)) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(lesson, "Lesson updated")))
        }
        Ok(None) => Ok(lesson_not_found()),
        Err(e) => Ok(internal_error("Failed to update lesson", e)),
    }
}

pub async fn delete_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    match storage.delete_lesson(course.id, lesson_id).await {
        Ok(true) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Lesson deleted")))
        }
        Ok(false) => Ok(lesson_not_found()),
        Err(e) => Ok(internal_error("Failed to delete lesson", e)),
    }
}

pub async fn reorder_lessons(
    service: &LessonService,
    request: &HttpRequest,
    module_id: i64,
    reorder: ReorderRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Err(msg) = reorder.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::LessonReorderFailed, msg)));
    }

    if let Err(response) = load_module(&storage, course.id, module_id).await {
        return Ok(response);
    }

    match storage.reorder_lessons(module_id, &reorder.items).await {
        Ok(items) => {
            info!(
                "Reordered {} lessons in module {} of course {}",
                items.len(),
                module_id,
                course.id
            );
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ReorderResponse { items },
                "Lessons reordered",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::LessonReorderFailed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_lesson_requires_url() {
        assert!(
            validate_lesson_fields(Some("Intro"), Some(LessonContentType::Video), None, None)
                .is_err()
        );
        assert!(
            validate_lesson_fields(
                Some("Intro"),
                Some(LessonContentType::Video),
                Some("https://v.example.com/1"),
                Some(12)
            )
            .is_ok()
        );
        assert!(validate_lesson_fields(None, Some(LessonContentType::Text), None, None).is_ok());
    }

    #[test]
    fn test_negative_duration_rejected() {
        assert!(validate_lesson_fields(None, None, None, Some(-5)).is_err());
        assert!(validate_lesson_fields(Some("  "), None, None, None).is_err());
    }
}
