use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::SubmissionService;
use crate::middlewares::require_course_access::resolve_course_access;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::entities::Assignment,
    common::response::internal_error,
    submissions::entities::Submission,
    users::entities::User,
};
use crate::services::current_user;
use crate::storage::Storage;

/// 当前用户与某份提交的关系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionRole {
    Author,
    Staff,
    Mentor,
}

impl SubmissionRole {
    pub fn can_review(&self) -> bool {
        matches!(self, SubmissionRole::Staff | SubmissionRole::Mentor)
    }
}

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::Forbidden,
        "No permission for this submission",
    ))
}

/// 加载提交及其作业，并判定当前用户的身份
///
/// 课程管理者优先于作者判定；学员的已接受导师也可访问。
pub(crate) async fn authorize_submission(
    storage: &Arc<dyn Storage>,
    user: &User,
    submission_id: i64,
) -> Result<(Submission, Assignment, SubmissionRole), HttpResponse> {
    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => return Err(internal_error("Failed to load submission", e)),
    };

    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => return Err(internal_error("Failed to load assignment", e)),
    };

    let course = match storage.get_course_by_id(assignment.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => return Err(internal_error("Failed to load course", e)),
    };

    let access = resolve_course_access(storage, user, &course)
        .await
        .map_err(|e| internal_error("Failed to resolve course access", e))?;

    let role = if access.is_some_and(|a| a.is_staff()) {
        SubmissionRole::Staff
    } else if submission.student_id == user.id {
        SubmissionRole::Author
    } else {
        match storage
            .has_accepted_mentorship(user.id, submission.student_id)
            .await
        {
            Ok(true) => SubmissionRole::Mentor,
            Ok(false) => return Err(forbidden()),
            Err(e) => return Err(internal_error("Failed to check mentorship", e)),
        }
    };

    Ok((submission, assignment, role))
}

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match authorize_submission(&storage, &user, submission_id).await {
        Ok((submission, _, _)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submission,
            "Submission retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_permission() {
        assert!(SubmissionRole::Staff.can_review());
        assert!(SubmissionRole::Mentor.can_review());
        assert!(!SubmissionRole::Author.can_review());
    }
}
