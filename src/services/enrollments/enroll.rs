use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::EnrollmentService;
use crate::models::{
    ApiResponse, ErrorCode,
    common::response::{internal_error, storage_error_response},
    enrollments::{entities::EnrollmentStatus, responses::EnrollmentListResponse},
    notifications::entities::{NewNotification, NotificationType},
};
use crate::services::current_user;

pub async fn enroll(
    service: &EnrollmentService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    // 未发布的课程对学员不可见
    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) if course.is_published() => course,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load course", e)),
    };

    match storage.get_enrollment(user.id, course.id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AlreadyEnrolled,
                "Already enrolled in this course",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to check enrollment", e)),
    }

    if !course.is_free() {
        match storage.has_completed_payment(user.id, course.id).await {
            Ok(true) => {}
            Ok(false) => {
                return Ok(HttpResponse::PaymentRequired().json(ApiResponse::error_empty(
                    ErrorCode::PaymentRequired,
                    "This course requires a completed payment",
                )));
            }
            Err(e) => return Ok(internal_error("Failed to check payment", e)),
        }
    }

    let enrollment = match storage.enroll_user(user.id, course.id).await {
        Ok(enrollment) => enrollment,
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::AlreadyEnrolled)),
    };

    info!("User {} enrolled in course {}", user.id, course.id);

    let notification = NewNotification::new(
        user.id,
        NotificationType::Enrollment,
        format!("You are enrolled in \"{}\"", course.title),
    )
    .reference("course", course.id);
    if let Err(e) = storage.create_notification(notification).await {
        warn!("Failed to create enrollment notification: {}", e);
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(enrollment, "Enrolled successfully")))
}

pub async fn unenroll(
    service: &EnrollmentService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let enrollment = match storage.get_enrollment(user.id, course_id).await {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentNotFound,
                "Enrollment not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load enrollment", e)),
    };

    if enrollment.status == EnrollmentStatus::Completed {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentCompleted,
            "Completed enrollments cannot be withdrawn",
        )));
    }

    match storage.delete_enrollment(user.id, course_id).await {
        Ok(true) => {
            info!("User {} left course {}", user.id, course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Unenrolled successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        ))),
        Err(e) => Ok(internal_error("Failed to unenroll", e)),
    }
}

pub async fn list_my_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.list_user_enrollments(user.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EnrollmentListResponse { items },
            "Enrollment list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to list enrollments", e)),
    }
}
