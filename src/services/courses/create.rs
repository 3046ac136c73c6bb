use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::storage_error_response,
    courses::requests::CreateCourseRequest,
    users::entities::UserRole,
};
use crate::services::current_user;
use crate::utils::validate::{slugify, validate_slug, validate_text};

const MAX_TITLE_LEN: usize = 200;

pub(crate) fn validate_price(price_cents: Option<i64>, currency: Option<&str>) -> Result<(), String> {
    if let Some(price) = price_cents
        && price < 0
    {
        return Err("Price must not be negative".into());
    }
    if let Some(currency) = currency
        && (currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()))
    {
        return Err("Currency must be a 3-letter ISO code".into());
    }
    Ok(())
}

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if let Err(msg) = validate_text("title", &course_data.title, MAX_TITLE_LEN) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if let Err(msg) = validate_price(course_data.price_cents, course_data.currency.as_deref()) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    // 1. slug：未提供时由标题生成
    let slug = match course_data.slug.take() {
        Some(slug) => slug.trim().to_string(),
        None => match slugify(&course_data.title) {
            Some(slug) => slug,
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationFailed,
                    "Cannot derive a slug from the title, please provide one",
                )));
            }
        },
    };
    if let Err(msg) = validate_slug(&slug) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage.get_course_by_slug(&slug).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CourseAlreadyExists,
                format!("Course slug '{slug}' is already taken"),
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::CourseAlreadyExists)),
    }

    // 2. 讲师：管理员可代为指定
    let instructor_id = match course_data.instructor_id.take() {
        Some(id) if user.role == UserRole::Admin && id != user.id => {
            match storage.get_user_by_id(id).await {
                Ok(Some(u)) if matches!(u.role, UserRole::Instructor | UserRole::Admin) => u.id,
                Ok(_) => {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::ValidationFailed,
                        "instructor_id must reference an instructor",
                    )));
                }
                Err(e) => return Ok(storage_error_response(&e, ErrorCode::UserNotFound)),
            }
        }
        _ => user.id,
    };

    if course_data.currency.is_none() {
        course_data.currency = Some(AppConfig::get().billing.currency.clone());
    }

    match storage.create_course(instructor_id, slug, course_data).await {
        Ok(course) => {
            info!("Course {} ({}) created by {}", course.id, course.slug, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "Course created")))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::CourseAlreadyExists)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Some(0), Some("usd")).is_ok());
        assert!(validate_price(None, None).is_ok());
        assert!(validate_price(Some(-1), None).is_err());
        assert!(validate_price(Some(100), Some("EURO")).is_err());
        assert!(validate_price(Some(100), Some("U$D")).is_err());
    }
}
