use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{SubmissionService, access::authorize_submission};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::entities::Rubric,
    common::response::{internal_error, storage_error_response},
    notifications::entities::{NewNotification, NotificationType},
    submissions::{
        entities::{ReviewDecision, SubmissionStatus},
        requests::CreateReviewRequest,
        responses::{ReviewListResponse, ReviewResultResponse},
    },
};
use crate::services::current_user;

/// 计算评审分数
///
/// 修改意见不带分数；评分时要么给出总分，要么按量规逐项给分。
fn resolve_review_score(
    review: &CreateReviewRequest,
    rubric: Option<&Rubric>,
    max_score: f64,
) -> Result<Option<f64>, String> {
    if review.decision == ReviewDecision::RevisionRequested {
        return Ok(None);
    }

    if let Some(scores) = review.criterion_scores.as_deref().filter(|s| !s.is_empty()) {
        let rubric = rubric.ok_or("Assignment has no rubric for criterion scores")?;
        return rubric.score(scores, max_score).map(Some);
    }

    match review.score {
        Some(score) if (0.0..=max_score).contains(&score) => Ok(Some(score)),
        Some(_) => Err(format!("Score must be between 0 and {max_score}")),
        None => Err("Graded reviews require a score or criterion scores".into()),
    }
}

pub async fn create_review(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    review_data: CreateReviewRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let (submission, assignment, role) =
        match authorize_submission(&storage, &user, submission_id).await {
            Ok(found) => found,
            Err(response) => return Ok(response),
        };

    if !role.can_review() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only course staff or the student's mentor can review",
        )));
    }

    if submission.status == SubmissionStatus::Graded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubmissionStatusInvalid,
            "Submission has already been graded",
        )));
    }

    let needs_rubric = review_data
        .criterion_scores
        .as_ref()
        .is_some_and(|s| !s.is_empty());
    let rubric = if needs_rubric {
        match storage.get_rubric(assignment.id).await {
            Ok(rubric) => rubric,
            Err(e) => return Ok(internal_error("Failed to load rubric", e)),
        }
    } else {
        None
    };

    let score = match resolve_review_score(&review_data, rubric.as_ref(), assignment.max_score) {
        Ok(score) => score,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ReviewInvalid, msg)));
        }
    };

    let (review, submission) = match storage
        .create_review(submission.id, user.id, review_data, score)
        .await
    {
        Ok(result) => result,
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::SubmissionStatusInvalid)),
    };

    info!(
        "Submission {} reviewed by user {}: {}",
        submission.id, user.id, review.decision
    );

    let title = match review.decision {
        ReviewDecision::Graded => format!("Your submission for \"{}\" was graded", assignment.title),
        ReviewDecision::RevisionRequested => {
            format!("Revision requested for \"{}\"", assignment.title)
        }
    };
    let notification = NewNotification::new(submission.student_id, NotificationType::Review, title)
        .reference("submission", submission.id);
    if let Err(e) = storage.create_notification(notification).await {
        warn!("Failed to notify student {}: {}", submission.student_id, e);
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        ReviewResultResponse { review, submission },
        "Review recorded",
    )))
}

pub async fn list_reviews(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if let Err(response) = authorize_submission(&storage, &user, submission_id).await {
        return Ok(response);
    }

    match storage.list_reviews(submission_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ReviewListResponse { items },
            "Review list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list reviews", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{assignments::entities::RubricCriterion, submissions::entities::CriterionScore};
    use chrono::Utc;

    fn review(decision: ReviewDecision, score: Option<f64>) -> CreateReviewRequest {
        CreateReviewRequest {
            decision,
            score,
            criterion_scores: None,
            comment: None,
        }
    }

    fn rubric() -> Rubric {
        let now = Utc::now();
        Rubric {
            id: 1,
            assignment_id: 1,
            title: "Essay".into(),
            criteria: vec![RubricCriterion {
                name: "Clarity".into(),
                description: None,
                weight: 1.0,
                max_points: 4.0,
            }],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_revision_request_has_no_score() {
        let r = review(ReviewDecision::RevisionRequested, Some(50.0));
        assert_eq!(resolve_review_score(&r, None, 100.0).unwrap(), None);
    }

    #[test]
    fn test_graded_requires_score_in_range() {
        assert_eq!(
            resolve_review_score(&review(ReviewDecision::Graded, Some(80.0)), None, 100.0).unwrap(),
            Some(80.0)
        );
        assert!(resolve_review_score(&review(ReviewDecision::Graded, Some(101.0)), None, 100.0).is_err());
        assert!(resolve_review_score(&review(ReviewDecision::Graded, None), None, 100.0).is_err());
    }

    #[test]
    fn test_criterion_scores_use_rubric() {
        let mut r = review(ReviewDecision::Graded, None);
        r.criterion_scores = Some(vec![CriterionScore {
            criterion: "Clarity".into(),
            score: 3.0,
        }]);
        assert!(resolve_review_score(&r, None, 100.0).is_err());
        assert_eq!(
            resolve_review_score(&r, Some(&rubric()), 100.0).unwrap(),
            Some(75.0)
        );
    }
}
