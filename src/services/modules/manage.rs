use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ModuleService;
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::{internal_error, storage_error_response},
    courses::{
        requests::{CreateModuleRequest, UpdateModuleRequest},
        responses::ModuleListResponse,
    },
};
use crate::services::{course_context, courses::invalidate_course_cache};
use crate::utils::validate::validate_text;

const MAX_TITLE_LEN: usize = 200;

fn module_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ModuleNotFound,
        "Module not found",
    ))
}

pub async fn list_modules(service: &ModuleService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    match storage.list_modules(course.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ModuleListResponse { items },
            "Module list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list modules", e)),
    }
}

pub async fn create_module(
    service: &ModuleService,
    request: &HttpRequest,
    module_data: CreateModuleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Err(msg) = validate_text("title", &module_data.title, MAX_TITLE_LEN) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage.create_module(course.id, module_data).await {
        Ok(module) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(module, "Module created")))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ValidationFailed)),
    }
}

pub async fn update_module(
    service: &ModuleService,
    request: &HttpRequest,
    module_id: i64,
    update_data: UpdateModuleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Some(title) = &update_data.title
        && let Err(msg) = validate_text("title", title, MAX_TITLE_LEN)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage.update_module(course.id, module_id, update_data).await {
        Ok(Some(module)) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(module, "Module updated")))
        }
        Ok(None) => Ok(module_not_found()),
        Err(e) => Ok(internal_error("Failed to update module", e)),
    }
}

pub async fn delete_module(
    service: &ModuleService,
    request: &HttpRequest,
    module_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    match storage.delete_module(course.id, module_id).await {
        Ok(true) => {
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Module deleted")))
        }
        Ok(false) => Ok(module_not_found()),
        Err(e) => Ok(internal_error("Failed to delete module", e)),
    }
}
