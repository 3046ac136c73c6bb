use chrono::{Duration, Utc};

use super::SeaOrmStorage;
use crate::errors::CourseHubError;
use crate::models::{
    assignments::requests::CreateAssignmentRequest,
    billing::entities::PaymentStatus,
    certificates::entities::NewCertificate,
    courses::{
        entities::Course,
        requests::{CreateCourseRequest, CreateLessonRequest, CreateModuleRequest, ReorderItem},
    },
    enrollments::entities::EnrollmentStatus,
    mentorship::{
        entities::MentorshipRequestStatus,
        requests::{CreateSessionRequest, UpsertMentorProfileRequest},
    },
    quizzes::{
        entities::{QuizGrade, QuizQuestion},
        requests::CreateQuizRequest,
    },
    submissions::{
        entities::{ReviewDecision, SubmissionStatus},
        requests::{CreateReviewRequest, CreateSubmissionRequest, SubmitFeedbackRequest},
    },
    users::{
        entities::{User, UserProfile, UserRole},
        requests::CreateUserRequest,
    },
};

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::new_in_memory().await.unwrap()
}

async fn user(s: &SeaOrmStorage, name: &str, role: UserRole) -> User {
    s.create_user_impl(CreateUserRequest {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password: "hash".to_string(),
        role,
        profile: UserProfile::default(),
    })
    .await
    .unwrap()
}

async fn course(s: &SeaOrmStorage, instructor_id: i64, slug: &str, price_cents: i64) -> Course {
    s.create_course_impl(
        instructor_id,
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

fn module_req(title: &str) -> CreateModuleRequest {
    CreateModuleRequest {
        title: title.to_string(),
        description: None,
    }
}

fn lesson_req(title: &str) -> CreateLessonRequest {
    CreateLessonRequest {
        title: title.to_string(),
        content: None,
        content_type: None,
        video_url: None,
        duration_minutes: None,
        is_preview: false,
    }
}

#[tokio::test]
async fn test_module_order_is_sequential() {
    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let c = course(&s, owner.id, "rust-101", 0).await;

    let a = s.create_module_impl(c.id, module_req("A")).await.unwrap();
    let b = s.create_module_impl(c.id, module_req("B")).await.unwrap();
    let d = s.create_module_impl(c.id, module_req("C")).await.unwrap();

    assert_eq!((a.sort_order, b.sort_order, d.sort_order), (1, 2, 3));
}

#[tokio::test]
async fn test_reorder_modules_applies_new_order() {
    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let c = course(&s, owner.id, "rust-101", 0).await;
    let a = s.create_module_impl(c.id, module_req("A")).await.unwrap();
    let b = s.create_module_impl(c.id, module_req("B")).await.unwrap();

    let results = s
        .reorder_modules_impl(
            c.id,
            &[
                ReorderItem { id: a.id, order: 2 },
                ReorderItem { id: b.id, order: 1 },
            ],
        )
        .await
        .unwrap();
    assert!(results.iter().all(|r| r.updated));

    let titles: Vec<String> = s
        .list_modules_impl(c.id)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.title)
        .collect();
    assert_eq!(titles, vec!["B", "A"]);
}

#[tokio::test]
async fn test_reorder_with_foreign_module_changes_nothing() {
    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let c1 = course(&s, owner.id, "course-one", 0).await;
    let c2 = course(&s, owner.id, "course-two", 0).await;
    let a = s.create_module_impl(c1.id, module_req("A")).await.unwrap();
    let b = s.create_module_impl(c1.id, module_req("B")).await.unwrap();
    let foreign = s.create_module_impl(c2.id, module_req("X")).await.unwrap();

    let err = s
        .reorder_modules_impl(
            c1.id,
            &[
                ReorderItem { id: a.id, order: 2 },
                ReorderItem { id: b.id, order: 1 },
                ReorderItem {
                    id: foreign.id,
                    order: 3,
                },
            ],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CourseHubError::Validation(_)));

    let orders: Vec<(i64, i32)> = s
        .list_modules_impl(c1.id)
        .await
        .unwrap()
        .into_iter()
        .map(|m| (m.id, m.sort_order))
        .collect();
    assert_eq!(orders, vec![(a.id, 1), (b.id, 2)]);
}

#[tokio::test]
async fn test_lesson_progress_is_idempotent() {
    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let student = user(&s, "student", UserRole::Student).await;
    let c = course(&s, owner.id, "rust-101", 0).await;
    let m = s.create_module_impl(c.id, module_req("A")).await.unwrap();
    let l1 = s.create_lesson_impl(c.id, m.id, lesson_req("one")).await.unwrap();
    s.create_lesson_impl(c.id, m.id, lesson_req("two")).await.unwrap();

    s.mark_lesson_complete_impl(student.id, c.id, l1.id)
        .await
        .unwrap();
    let progress = s
        .mark_lesson_complete_impl(student.id, c.id, l1.id)
        .await
        .unwrap();

    assert_eq!((progress.completed, progress.total), (1, 2));
}

#[tokio::test]
async fn test_duplicate_enrollment_conflicts() {
    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let student = user(&s, "student", UserRole::Student).await;
    let c = course(&s, owner.id, "rust-101", 0).await;

    s.enroll_user_impl(student.id, c.id).await.unwrap();
    let err = s.enroll_user_impl(student.id, c.id).await.unwrap_err();

    assert!(matches!(err, CourseHubError::Conflict(_)));
    assert_eq!(s.count_course_enrollments_impl(c.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_quiz_attempts_are_limited() {
    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let student = user(&s, "student", UserRole::Student).await;
    let c = course(&s, owner.id, "rust-101", 0).await;
    let quiz = s
        .create_quiz_impl(
            c.id,
            CreateQuizRequest {
                module_id: None,
                title: "Basics".to_string(),
                description: None,
                passing_score: 50,
                max_attempts: Some(2),
                time_limit_minutes: None,
                questions: vec![QuizQuestion {
                    prompt: "1 + 1?".to_string(),
                    options: vec!["1".to_string(), "2".to_string()],
                    correct_option: Some(1),
                    points: 1,
                }],
            },
        )
        .await
        .unwrap();
    let grade = QuizGrade {
        score: 0.0,
        passed: false,
    };

    let first = s
        .create_quiz_attempt_impl(&quiz, student.id, vec![0], grade)
        .await
        .unwrap();
    let second = s
        .create_quiz_attempt_impl(&quiz, student.id, vec![0], grade)
        .await
        .unwrap();
    let err = s
        .create_quiz_attempt_impl(&quiz, student.id, vec![1], grade)
        .await
        .unwrap_err();

    assert_eq!((first.attempt_number, second.attempt_number), (1, 2));
    assert!(matches!(err, CourseHubError::Conflict(_)));
}

async fn submission_fixture(s: &SeaOrmStorage) -> (User, User, i64) {
    let owner = user(s, "owner", UserRole::Instructor).await;
    let student = user(s, "student", UserRole::Student).await;
    let c = course(s, owner.id, "rust-101", 0).await;
    let assignment = s
        .create_assignment_impl(
            c.id,
            owner.id,
            CreateAssignmentRequest {
                module_id: None,
                title: "Essay".to_string(),
                description: None,
                max_score: 100.0,
                due_at: None,
                allow_late: false,
            },
        )
        .await
        .unwrap();
    let submission = s
        .create_submission_impl(
            assignment.id,
            student.id,
            CreateSubmissionRequest {
                content: "draft".to_string(),
                attachment_url: None,
            },
            false,
        )
        .await
        .unwrap();
    (owner, student, submission.id)
}

fn review(decision: ReviewDecision, score: Option<f64>) -> CreateReviewRequest {
    CreateReviewRequest {
        decision,
        score,
        criterion_scores: None,
        comment: Some("ok".to_string()),
    }
}

#[tokio::test]
async fn test_graded_submission_rejects_further_reviews() {
    let s = storage().await;
    let (owner, _, submission_id) = submission_fixture(&s).await;

    let (_, graded) = s
        .create_review_impl(
            submission_id,
            owner.id,
            review(ReviewDecision::Graded, Some(90.0)),
            Some(90.0),
        )
        .await
        .unwrap();
    assert_eq!(graded.status, SubmissionStatus::Graded);
    assert_eq!(graded.score, Some(90.0));

    let err = s
        .create_review_impl(
            submission_id,
            owner.id,
            review(ReviewDecision::Graded, Some(95.0)),
            Some(95.0),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CourseHubError::Validation(_)));
    assert_eq!(s.list_reviews_impl(submission_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_feedback_requires_revision_request() {
    let s = storage().await;
    let (owner, _, submission_id) = submission_fixture(&s).await;
    let feedback = || SubmitFeedbackRequest {
        content: "second draft".to_string(),
        note: Some("fixed intro".to_string()),
        attachment_url: None,
    };

    let err = s
        .resubmit_submission_impl(submission_id, feedback())
        .await
        .unwrap_err();
    assert!(matches!(err, CourseHubError::Validation(_)));

    s.create_review_impl(
        submission_id,
        owner.id,
        review(ReviewDecision::RevisionRequested, None),
        None,
    )
    .await
    .unwrap();
    let resubmitted = s
        .resubmit_submission_impl(submission_id, feedback())
        .await
        .unwrap();

    assert_eq!(resubmitted.status, SubmissionStatus::Resubmitted);
    assert_eq!(resubmitted.revision_count, 1);
    assert_eq!(resubmitted.content, "second draft");
}

#[tokio::test]
async fn test_completed_payment_enrolls_once() {
    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let student = user(&s, "student", UserRole::Student).await;
    let c = course(&s, owner.id, "paid-course", 4999).await;

    let payment = s.create_or_reuse_payment_impl(student.id, &c).await.unwrap();
    let reused = s.create_or_reuse_payment_impl(student.id, &c).await.unwrap();
    assert_eq!(payment.id, reused.id);
    assert_eq!(payment.amount_cents, 4999);

    let (paid, enrolled) = s
        .apply_payment_event_impl(payment.id, PaymentStatus::Completed, Some("ch_1".into()))
        .await
        .unwrap();
    assert_eq!(paid.status, PaymentStatus::Completed);
    assert!(enrolled);
    assert!(s.get_enrollment_impl(student.id, c.id).await.unwrap().is_some());
    assert_eq!(s.count_unread_notifications_impl(student.id).await.unwrap(), 1);

    // 重复回调不再生效
    let err = s
        .apply_payment_event_impl(payment.id, PaymentStatus::Completed, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CourseHubError::Validation(_)));
}

#[tokio::test]
async fn test_refund_requires_completed_payment() {
    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let student = user(&s, "student", UserRole::Student).await;
    let c = course(&s, owner.id, "paid-course", 1000).await;
    let payment = s.create_or_reuse_payment_impl(student.id, &c).await.unwrap();

    assert!(s.refund_payment_impl(payment.id).await.is_err());

    s.apply_payment_event_impl(payment.id, PaymentStatus::Completed, None)
        .await
        .unwrap();
    let refunded = s.refund_payment_impl(payment.id).await.unwrap();
    assert_eq!(refunded.status, PaymentStatus::Refunded);
}

#[tokio::test]
async fn test_issue_certificate_completes_enrollment() {
    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let student = user(&s, "student", UserRole::Student).await;
    let c = course(&s, owner.id, "rust-101", 0).await;
    let enrollment = s.enroll_user_impl(student.id, c.id).await.unwrap();

    let new_cert = || NewCertificate {
        user_id: student.id,
        course_id: c.id,
        enrollment_id: enrollment.id,
        credential_id: "local-1".to_string(),
        verification_url: None,
        verification_code: "ABCD2345".to_string(),
    };

    let cert = s.issue_certificate_impl(new_cert()).await.unwrap();
    assert_eq!(cert.verification_code, "ABCD2345");

    let enrollment = s.get_enrollment_impl(student.id, c.id).await.unwrap().unwrap();
    assert_eq!(enrollment.status, EnrollmentStatus::Completed);
    assert!(enrollment.completed_at.is_some());

    let verification = s
        .get_certificate_verification_impl("ABCD2345")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(verification.course_title, "rust-101");
    assert_eq!(verification.recipient_name, "student");

    let err = s.issue_certificate_impl(new_cert()).await.unwrap_err();
    assert!(matches!(err, CourseHubError::Conflict(_)));
}

#[tokio::test]
async fn test_mentorship_flow_and_session_overlap() {
    let s = storage().await;
    let mentor = user(&s, "mentor", UserRole::Mentor).await;
    let student = user(&s, "student", UserRole::Student).await;
    let profile = s
        .upsert_mentor_profile_impl(
            mentor.id,
            UpsertMentorProfileRequest {
                headline: "Systems programming".to_string(),
                bio: None,
                expertise: vec!["rust".to_string(), " ".to_string()],
                hourly_rate_cents: None,
                max_mentees: 1,
                is_accepting: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(profile.expertise, vec!["rust"]);

    let request = s
        .create_mentorship_request_impl(&profile, student.id, None)
        .await
        .unwrap();
    let duplicate = s
        .create_mentorship_request_impl(&profile, student.id, None)
        .await
        .unwrap_err();
    assert!(matches!(duplicate, CourseHubError::Conflict(_)));

    let accepted = s
        .respond_mentorship_request_impl(request.id, MentorshipRequestStatus::Accepted, None)
        .await
        .unwrap();
    assert_eq!(accepted.status, MentorshipRequestStatus::Accepted);
    assert!(accepted.responded_at.is_some());
    assert!(s.has_accepted_mentorship_impl(mentor.id, student.id).await.unwrap());

    let start = Utc::now() + Duration::days(1);
    s.create_session_impl(
        &accepted,
        CreateSessionRequest {
            starts_at: start,
            duration_minutes: 60,
            topic: None,
            meeting_url: None,
        },
    )
    .await
    .unwrap();

    let err = s
        .create_session_impl(
            &accepted,
            CreateSessionRequest {
                starts_at: start + Duration::minutes(30),
                duration_minutes: 30,
                topic: None,
                meeting_url: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CourseHubError::Conflict(_)));

    s.create_session_impl(
        &accepted,
        CreateSessionRequest {
            starts_at: start + Duration::minutes(60),
            duration_minutes: 30,
            topic: None,
            meeting_url: None,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_mentor_capacity_is_enforced() {
    let s = storage().await;
    let mentor = user(&s, "mentor", UserRole::Mentor).await;
    let first = user(&s, "first", UserRole::Student).await;
    let second = user(&s, "second", UserRole::Student).await;
    let profile = s
        .upsert_mentor_profile_impl(
            mentor.id,
            UpsertMentorProfileRequest {
                headline: "Databases".to_string(),
                bio: None,
                expertise: vec![],
                hourly_rate_cents: None,
                max_mentees: 1,
                is_accepting: true,
            },
        )
        .await
        .unwrap();

    let r1 = s
        .create_mentorship_request_impl(&profile, first.id, None)
        .await
        .unwrap();
    let r2 = s
        .create_mentorship_request_impl(&profile, second.id, None)
        .await
        .unwrap();
    s.respond_mentorship_request_impl(r1.id, MentorshipRequestStatus::Accepted, None)
        .await
        .unwrap();

    let err = s
        .respond_mentorship_request_impl(r2.id, MentorshipRequestStatus::Accepted, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CourseHubError::Validation(_)));
}

#[tokio::test]
async fn test_notifications_are_scoped_to_owner() {
    use crate::models::notifications::entities::{NewNotification, NotificationType};

    let s = storage().await;
    let alice = user(&s, "alice", UserRole::Student).await;
    let bob = user(&s, "bob", UserRole::Student).await;

    let n = s
        .create_notification_impl(NewNotification::new(
            alice.id,
            NotificationType::System,
            "Welcome",
        ))
        .await
        .unwrap();
    s.create_notification_impl(NewNotification::new(
        alice.id,
        NotificationType::System,
        "Second",
    ))
    .await
    .unwrap();

    assert!(!s.mark_notification_read_impl(bob.id, n.id).await.unwrap());
    assert!(s.mark_notification_read_impl(alice.id, n.id).await.unwrap());
    assert_eq!(s.count_unread_notifications_impl(alice.id).await.unwrap(), 1);
    assert_eq!(s.mark_all_notifications_read_impl(alice.id).await.unwrap(), 1);
    assert!(!s.delete_notification_impl(bob.id, n.id).await.unwrap());
    assert!(s.delete_notification_impl(alice.id, n.id).await.unwrap());
}

#[tokio::test]
async fn test_locked_thread_rejects_replies_unless_allowed() {
    use crate::models::forums::requests::{CreateThreadRequest, UpdateThreadRequest};

    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let alice = user(&s, "alice", UserRole::Student).await;
    let c = course(&s, owner.id, "forum", 0).await;

    let thread = s
        .create_thread_impl(
            c.id,
            alice.id,
            CreateThreadRequest {
                title: "Question".into(),
                body: "How?".into(),
            },
        )
        .await
        .unwrap();
    s.create_post_impl(thread.id, owner.id, "Like this".into(), false)
        .await
        .unwrap();

    s.update_thread_impl(
        thread.id,
        UpdateThreadRequest {
            is_locked: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let err = s
        .create_post_impl(thread.id, alice.id, "One more".into(), false)
        .await
        .unwrap_err();
    assert!(matches!(err, CourseHubError::Validation(_)));

    s.create_post_impl(thread.id, owner.id, "Closing".into(), true)
        .await
        .unwrap();
    let thread = s.get_thread_impl(c.id, thread.id).await.unwrap().unwrap();
    assert_eq!(thread.reply_count, 2);
}

#[tokio::test]
async fn test_concurrent_posts_keep_reply_count() {
    use crate::models::forums::requests::CreateThreadRequest;
    use futures_util::future::join_all;

    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let alice = user(&s, "alice", UserRole::Student).await;
    let c = course(&s, owner.id, "forum", 0).await;
    let thread = s
        .create_thread_impl(
            c.id,
            alice.id,
            CreateThreadRequest {
                title: "Busy".into(),
                body: "Lots of replies".into(),
            },
        )
        .await
        .unwrap();

    let posts = join_all(
        (0..5).map(|i| s.create_post_impl(thread.id, owner.id, format!("reply {i}"), false)),
    )
    .await;
    let posts: Vec<_> = posts.into_iter().map(|p| p.unwrap()).collect();
    let reloaded = s.get_thread_impl(c.id, thread.id).await.unwrap().unwrap();
    assert_eq!(reloaded.reply_count, 5);

    assert!(s.delete_post_impl(thread.id, posts[0].id).await.unwrap());
    assert!(!s.delete_post_impl(thread.id, posts[0].id).await.unwrap());
    let reloaded = s.get_thread_impl(c.id, thread.id).await.unwrap().unwrap();
    assert_eq!(reloaded.reply_count, 4);
}

#[tokio::test]
async fn test_concurrent_quiz_attempts_respect_limit() {
    use futures_util::future::join_all;

    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let student = user(&s, "student", UserRole::Student).await;
    let c = course(&s, owner.id, "rust-101", 0).await;
    let quiz = s
        .create_quiz_impl(
            c.id,
            CreateQuizRequest {
                module_id: None,
                title: "Race".to_string(),
                description: None,
                passing_score: 50,
                max_attempts: Some(2),
                time_limit_minutes: None,
                questions: vec![QuizQuestion {
                    prompt: "2 + 2?".to_string(),
                    options: vec!["3".to_string(), "4".to_string()],
                    correct_option: Some(1),
                    points: 1,
                }],
            },
        )
        .await
        .unwrap();
    let grade = QuizGrade {
        score: 100.0,
        passed: true,
    };

    let results = join_all(
        (0..4).map(|_| s.create_quiz_attempt_impl(&quiz, student.id, vec![1], grade)),
    )
    .await;
    let mut numbers: Vec<i32> = results
        .iter()
        .filter_map(|r| r.as_ref().ok().map(|a| a.attempt_number))
        .collect();
    numbers.sort();
    assert_eq!(numbers, vec![1, 2]);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, CourseHubError::Conflict(_)))
    );
}

#[tokio::test]
async fn test_pending_payment_is_replaced_after_price_change() {
    use crate::models::billing::requests::PaymentListQuery;
    use crate::models::courses::requests::UpdateCourseRequest;

    let s = storage().await;
    let owner = user(&s, "owner", UserRole::Instructor).await;
    let student = user(&s, "student", UserRole::Student).await;
    let c = course(&s, owner.id, "paid-course", 1000).await;

    let stale = s.create_or_reuse_payment_impl(student.id, &c).await.unwrap();
    let c = s
        .update_course_impl(
            c.id,
            UpdateCourseRequest {
                price_cents: Some(1500),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    let fresh = s.create_or_reuse_payment_impl(student.id, &c).await.unwrap();
    assert_ne!(fresh.id, stale.id);
    assert_eq!(fresh.amount_cents, 1500);
    assert_eq!(fresh.status, PaymentStatus::Pending);

    let stale = s.get_payment_impl(stale.id).await.unwrap().unwrap();
    assert_eq!(stale.status, PaymentStatus::Failed);

    // 价格不变时继续复用
    let again = s.create_or_reuse_payment_impl(student.id, &c).await.unwrap();
    assert_eq!(again.id, fresh.id);

    let pending = s
        .list_payments_with_pagination_impl(PaymentListQuery {
            user_id: Some(student.id),
            status: Some(PaymentStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.items.len(), 1);
}

#[tokio::test]
async fn test_email_lookup_ignores_case() {
    let s = storage().await;
    let alice = user(&s, "alice", UserRole::Student).await;

    let found = s
        .get_user_by_username_or_email_impl("Alice@Example.COM")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, alice.id);
    assert!(s.get_user_by_email_impl("ALICE@example.com").await.unwrap().is_some());

    // 用户名仍区分大小写
    assert!(s.get_user_by_username_or_email_impl("ALICE").await.unwrap().is_none());
}
