use super::*;
use actix_web::{App, http::StatusCode, test, web};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::cache::{ResourceCache, object_cache::moka::MokaCacheWrapper};
use crate::errors::CourseHubError;
use crate::integrations::{
    CredentialIssuer, CredentialRequest, IssuedCredential, LocalCredentialIssuer, LogMailer,
    Mailer,
};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use crate::models::courses::entities::{Course, CourseStatus};
use crate::models::courses::requests::{
    CreateCourseRequest, CreateLessonRequest, CreateModuleRequest, UpdateCourseRequest,
};
use crate::models::users::entities::{User, UserProfile, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::models::{AppStartTime, ErrorCode};
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

async fn storage() -> Arc<dyn Storage> {
    Arc::new(SeaOrmStorage::new_in_memory().await.unwrap())
}

async fn user(storage: &Arc<dyn Storage>, name: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "hash".to_string(),
            role,
            profile: UserProfile::default(),
        })
        .await
        .unwrap()
}

async fn course(storage: &Arc<dyn Storage>, owner: &User, slug: &str, price_cents: i64) -> Course {
    storage
        .create_course(
            owner.id,
            slug.to_string(),
            CreateCourseRequest {
                title: slug.to_string(),
                slug: None,
                summary: None,
                description: None,
                category: None,
                level: None,
                price_cents: Some(price_cents),
                currency: None,
                instructor_id: None,
            },
        )
        .await
        .unwrap()
}

async fn publish(storage: &Arc<dyn Storage>, course: &Course) {
    storage
        .update_course(
            course.id,
            UpdateCourseRequest {
                status: Some(CourseStatus::Published),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

fn bearer(user: &User) -> (&'static str, String) {
    let tokens = user.generate_token_pair(None).unwrap();
    ("Authorization", format!("Bearer {}", tokens.access_token))
}

fn local_issuer() -> Arc<dyn CredentialIssuer> {
    Arc::new(LocalCredentialIssuer)
}

/// 始终失败的凭证服务
struct UnavailableIssuer;

#[async_trait]
impl CredentialIssuer for UnavailableIssuer {
    async fn issue(&self, _request: &CredentialRequest) -> crate::errors::Result<IssuedCredential> {
        Err(CourseHubError::external_service("credential service is down"))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

macro_rules! app {
    ($storage:expr) => {
        app!($storage, local_issuer())
    };
    ($storage:expr, $issuer:expr) => {{
        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);
        let cache = ResourceCache::new(Arc::new(MokaCacheWrapper::with_settings(1000, 300)));
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new(cache))
                .app_data(web::Data::new($issuer))
                .app_data(web::Data::new(mailer))
                .app_data(web::Data::new(AppStartTime::now()))
                .configure(configure_course_routes)
                .configure(configure_enrollment_routes)
                .configure(configure_billing_routes)
                .configure(configure_certificate_routes)
                .configure(configure_system_routes)
                .configure(configure_user_routes),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_health_is_public() {
    let storage = storage().await;
    let app = app!(storage);

    let req = test::TestRequest::get()
        .uri("/api/v1/system/health")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_course_routes_require_token() {
    let storage = storage().await;
    let app = app!(storage);

    for uri in ["/api/v1/courses", "/api/v1/courses/1/modules"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[actix_web::test]
async fn test_public_endpoints_skip_jwt() {
    let storage = storage().await;
    let app = app!(storage);

    let req = test::TestRequest::get()
        .uri("/api/v1/certificates/verify/ABCDEFGH2345")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 无签名的回调被拒绝，但不是因为缺少登录
    let req = test::TestRequest::post()
        .uri("/api/v1/billing/webhook")
        .set_payload(r#"{"payment_id":1,"status":"completed"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/certificates")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_staff_routes_reject_enrolled_students() {
    let storage = storage().await;
    let owner = user(&storage, "owner01", UserRole::Instructor).await;
    let student = user(&storage, "student01", UserRole::Student).await;
    let outsider = user(&storage, "outsider01", UserRole::Student).await;
    let course = course(&storage, &owner, "rust-101", 0).await;
    storage.enroll_user(student.id, course.id).await.unwrap();
    let app = app!(storage);
    let modules = format!("/api/v1/courses/{}/modules", course.id);

    // 已选课学员可读，不可写
    let req = test::TestRequest::get()
        .uri(&modules)
        .insert_header(bearer(&student))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&modules)
        .insert_header(bearer(&student))
        .set_json(serde_json::json!({ "title": "Intro" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    // 未选课学员连读取都被拒绝
    let req = test::TestRequest::get()
        .uri(&modules)
        .insert_header(bearer(&outsider))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::post()
        .uri(&modules)
        .insert_header(bearer(&owner))
        .set_json(serde_json::json!({ "title": "Intro" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );
}

#[actix_web::test]
async fn test_admin_user_detail_lists_enrollments() {
    let storage = storage().await;
    let admin = user(&storage, "admin01", UserRole::Admin).await;
    let owner = user(&storage, "owner02", UserRole::Instructor).await;
    let student = user(&storage, "student02", UserRole::Student).await;
    let course = course(&storage, &owner, "go-101", 0).await;
    storage.enroll_user(student.id, course.id).await.unwrap();
    let app = app!(storage);
    let uri = format!("/api/v1/users/{}", student.id);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&admin))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["user"]["username"], "student02");
    assert_eq!(body["data"]["enrollments"][0]["course_title"], "go-101");

    // 非管理员被拒绝
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&student))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn test_suspended_user_loses_access_with_same_token() {
    let storage = storage().await;
    let admin = user(&storage, "admin02", UserRole::Admin).await;
    let student = user(&storage, "student03", UserRole::Student).await;
    let app = app!(storage);

    // 第一次请求写入用户缓存
    let req = test::TestRequest::get()
        .uri("/api/v1/enrollments")
        .insert_header(bearer(&student))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", student.id))
        .insert_header(bearer(&admin))
        .set_json(serde_json::json!({ "status": "suspended" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/enrollments")
        .insert_header(bearer(&student))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_demoted_user_loses_role_with_same_token() {
    let storage = storage().await;
    let admin = user(&storage, "admin03", UserRole::Admin).await;
    let other = user(&storage, "admin04", UserRole::Admin).await;
    let app = app!(storage);

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer(&other))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", other.id))
        .insert_header(bearer(&admin))
        .set_json(serde_json::json!({ "role": "student" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer(&other))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn test_paid_course_requires_completed_payment() {
    let storage = storage().await;
    let owner = user(&storage, "owner03", UserRole::Instructor).await;
    let student = user(&storage, "student04", UserRole::Student).await;
    let paid = course(&storage, &owner, "paid-101", 4999).await;
    let free = course(&storage, &owner, "free-101", 0).await;
    publish(&storage, &paid).await;
    publish(&storage, &free).await;
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{}/enroll", paid.id))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::PaymentRequired as i32);
    assert!(storage.get_enrollment(student.id, paid.id).await.unwrap().is_none());

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{}/enroll", free.id))
        .insert_header(bearer(&student))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );
}

/// 带一个未完成课时的已选课课程
async fn course_with_lesson(storage: &Arc<dyn Storage>, owner: &User, student: &User) -> Course {
    let course = course(storage, owner, "cert-101", 0).await;
    let module = storage
        .create_module(
            course.id,
            CreateModuleRequest {
                title: "Basics".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    storage
        .create_lesson(
            course.id,
            module.id,
            CreateLessonRequest {
                title: "Ownership".to_string(),
                content: None,
                content_type: None,
                video_url: None,
                duration_minutes: None,
                is_preview: false,
            },
        )
        .await
        .unwrap();
    storage.enroll_user(student.id, course.id).await.unwrap();
    course
}

#[actix_web::test]
async fn test_certificate_requires_completion_for_self_request() {
    let storage = storage().await;
    let owner = user(&storage, "owner04", UserRole::Instructor).await;
    let student = user(&storage, "student05", UserRole::Student).await;
    let course = course_with_lesson(&storage, &owner, &student).await;
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{}/certificates", course.id))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::CourseNotCompleted as i32);
    assert!(
        storage
            .get_certificate_for(student.id, course.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[actix_web::test]
async fn test_staff_can_issue_certificate_without_completion() {
    let storage = storage().await;
    let owner = user(&storage, "owner05", UserRole::Instructor).await;
    let student = user(&storage, "student06", UserRole::Student).await;
    let course = course_with_lesson(&storage, &owner, &student).await;
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{}/certificates", course.id))
        .insert_header(bearer(&owner))
        .set_json(serde_json::json!({ "user_id": student.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user_id"], student.id);

    let issued = storage
        .get_certificate_for(student.id, course.id)
        .await
        .unwrap()
        .unwrap();
    assert!(issued.credential_id.starts_with("local-"));
}

#[actix_web::test]
async fn test_issuer_failure_returns_bad_gateway_and_persists_nothing() {
    let storage = storage().await;
    let owner = user(&storage, "owner06", UserRole::Instructor).await;
    let student = user(&storage, "student07", UserRole::Student).await;
    let course = course_with_lesson(&storage, &owner, &student).await;
    let issuer: Arc<dyn CredentialIssuer> = Arc::new(UnavailableIssuer);
    let app = app!(storage, issuer);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/courses/{}/certificates", course.id))
        .insert_header(bearer(&owner))
        .set_json(serde_json::json!({ "user_id": student.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::CertificateIssueFailed as i32);

    assert!(
        storage
            .get_certificate_for(student.id, course.id)
            .await
            .unwrap()
            .is_none()
    );
    let enrollment = storage
        .get_enrollment(student.id, course.id)
        .await
        .unwrap()
        .unwrap();
    assert!(enrollment.completed_at.is_none());
}

async fn assignment(
    storage: &Arc<dyn Storage>,
    course: &Course,
    owner: &User,
    due_in_hours: Option<i64>,
    allow_late: bool,
) -> Assignment {
    storage
        .create_assignment(
            course.id,
            owner.id,
            CreateAssignmentRequest {
                module_id: None,
                title: "Essay".to_string(),
                description: None,
                max_score: 100.0,
                due_at: due_in_hours.map(|h| Utc::now() + Duration::hours(h)),
                allow_late,
            },
        )
        .await
        .unwrap()
}

#[actix_web::test]
async fn test_submission_deadline_and_duplicate_rules() {
    let storage = storage().await;
    let owner = user(&storage, "owner07", UserRole::Instructor).await;
    let student = user(&storage, "student08", UserRole::Student).await;
    let course = course(&storage, &owner, "essays-101", 0).await;
    storage.enroll_user(student.id, course.id).await.unwrap();
    let open = assignment(&storage, &course, &owner, Some(24), false).await;
    let closed = assignment(&storage, &course, &owner, Some(-24), false).await;
    let late_ok = assignment(&storage, &course, &owner, Some(-24), true).await;
    let app = app!(storage);

    let submit = |assignment_id: i64| {
        test::TestRequest::post()
            .uri(&format!(
                "/api/v1/courses/{}/assignments/{}/submissions",
                course.id, assignment_id
            ))
            .insert_header(bearer(&student))
            .set_json(serde_json::json!({ "content": "My essay" }))
            .to_request()
    };

    let resp = test::call_service(&app, submit(open.id)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["is_late"], false);

    // 每个作业只能提交一次
    let resp = test::call_service(&app, submit(open.id)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::SubmissionAlreadyExists as i32);

    let resp = test::call_service(&app, submit(closed.id)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], ErrorCode::SubmissionDeadlinePassed as i32);

    let resp = test::call_service(&app, submit(late_ok.id)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["is_late"], true);
}

#[actix_web::test]
async fn test_deleted_course_is_not_served_from_cache() {
    let storage = storage().await;
    let admin = user(&storage, "admin05", UserRole::Admin).await;
    let owner = user(&storage, "owner08", UserRole::Instructor).await;
    let student = user(&storage, "student09", UserRole::Student).await;
    let course = course(&storage, &owner, "gone-101", 0).await;
    storage.enroll_user(student.id, course.id).await.unwrap();
    let app = app!(storage);
    let modules = format!("/api/v1/courses/{}/modules", course.id);

    let req = test::TestRequest::get()
        .uri(&modules)
        .insert_header(bearer(&student))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/courses/{}", course.id))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&modules)
        .insert_header(bearer(&student))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
