pub mod manage;
pub mod reorder;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::courses::requests::{CreateModuleRequest, ReorderRequest, UpdateModuleRequest};

storage_service!(ModuleService);

impl ModuleService {
    pub async fn list_modules(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::list_modules(self, request).await
    }

    pub async fn create_module(
        &self,
        request: &HttpRequest,
        module_data: CreateModuleRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_module(self, request, module_data).await
    }

    pub async fn update_module(
        &self,
        request: &HttpRequest,
        module_id: i64,
        update_data: UpdateModuleRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_module(self, request, module_id, update_data).await
    }

    pub async fn delete_module(
        &self,
        request: &HttpRequest,
        module_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_module(self, request, module_id).await
    }

    // 批量调整章节顺序
    pub async fn reorder_modules(
        &self,
        request: &HttpRequest,
        reorder: ReorderRequest,
    ) -> ActixResult<HttpResponse> {
        reorder::reorder_modules(self, request, reorder).await
    }
}
