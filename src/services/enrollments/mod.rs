pub mod enroll;
pub mod roster;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::enrollments::requests::RosterListParams;

storage_service!(EnrollmentService);

impl EnrollmentService {
    pub async fn enroll(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        enroll::enroll(self, request, course_id).await
    }

    pub async fn unenroll(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        enroll::unenroll(self, request, course_id).await
    }

    pub async fn list_my_enrollments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        enroll::list_my_enrollments(self, request).await
    }

    /// 课程花名册
    pub async fn list_roster(
        &self,
        request: &HttpRequest,
        params: RosterListParams,
    ) -> ActixResult<HttpResponse> {
        roster::list_roster(self, request, params).await
    }

    pub async fn export_roster(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        roster::export_roster(self, request).await
    }
}
