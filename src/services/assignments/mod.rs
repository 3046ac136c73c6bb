pub mod manage;
pub mod rubric;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest, UpsertRubricRequest},
    },
    common::response::internal_error,
};
use crate::storage::Storage;

storage_service!(AssignmentService);

impl AssignmentService {
    pub async fn list_assignments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::list_assignments(self, request).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        assignment_data: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_assignment(self, request, assignment_data).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::get_assignment(self, request, assignment_id).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        update_data: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_assignment(self, request, assignment_id, update_data).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_assignment(self, request, assignment_id).await
    }

    pub async fn get_rubric(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        rubric::get_rubric(self, request, assignment_id).await
    }

    pub async fn upsert_rubric(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        rubric_data: UpsertRubricRequest,
    ) -> ActixResult<HttpResponse> {
        rubric::upsert_rubric(self, request, assignment_id, rubric_data).await
    }
}

pub(crate) async fn load_assignment(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    assignment_id: i64,
) -> Result<Assignment, HttpResponse> {
    match storage.get_assignment(course_id, assignment_id).await {
        Ok(Some(assignment)) => Ok(assignment),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Err(internal_error("Failed to load assignment", e)),
    }
}
