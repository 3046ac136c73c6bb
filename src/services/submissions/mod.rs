pub mod access;
pub mod create;
pub mod feedback;
pub mod list;
pub mod review;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::submissions::requests::{
    CreateReviewRequest, CreateSubmissionRequest, SubmissionListParams, SubmitFeedbackRequest,
};

storage_service!(SubmissionService);

impl SubmissionService {
    /// 学员提交作业
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        submission_data: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, assignment_id, submission_data).await
    }

    /// 列出某作业的提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        params: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, assignment_id, params).await
    }

    pub async fn export_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::export_submissions(self, request, assignment_id).await
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        access::get_submission(self, request, submission_id).await
    }

    /// 评审提交
    pub async fn create_review(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        review_data: CreateReviewRequest,
    ) -> ActixResult<HttpResponse> {
        review::create_review(self, request, submission_id, review_data).await
    }

    pub async fn list_reviews(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        review::list_reviews(self, request, submission_id).await
    }

    /// 学员回应修改意见
    pub async fn submit_feedback(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        feedback_data: SubmitFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        feedback::submit_feedback(self, request, submission_id, feedback_data).await
    }
}
