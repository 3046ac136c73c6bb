use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ModuleService;
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::storage_error_response,
    courses::{requests::ReorderRequest, responses::ReorderResponse},
};
use crate::services::{course_context, courses::invalidate_course_cache};

/// 整批排序在一个事务内完成：任一条目不属于该课程时整体回滚并返回 400
pub async fn reorder_modules(
    service: &ModuleService,
    request: &HttpRequest,
    reorder: ReorderRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (course, _) = course_context(request)?;

    if let Err(msg) = reorder.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ModuleReorderFailed, msg)));
    }

    match storage.reorder_modules(course.id, &reorder.items).await {
        Ok(items) => {
            let changed = items.iter().filter(|r| r.updated).count();
            info!(
                "Reordered modules of course {}: {} of {} changed",
                course.id,
                changed,
                items.len()
            );
            invalidate_course_cache(request, course.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ReorderResponse { items },
                "Modules reordered",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ModuleReorderFailed)),
    }
}
