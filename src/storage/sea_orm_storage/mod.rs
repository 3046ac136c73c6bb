//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod billing;
mod certificates;
mod courses;
mod enrollments;
mod forums;
mod lessons;
mod mentorship;
mod modules;
mod notifications;
mod progress;
mod quizzes;
mod submissions;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{CourseHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config.database.pool_size, config.database.timeout)
                .await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;
        info!("Storage initialized, database: {}", redact_url(&db_url));

        Ok(Self { db })
    }

    /// 内存数据库，单连接保证所有查询看到同一个库
    #[cfg(test)]
    pub(crate) async fn new_in_memory() -> Result<Self> {
        let db = Self::connect_sqlite("sqlite::memory:", 1, 5).await?;
        Self::migrate(&db).await?;
        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("Migration failed: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| {
                CourseHubError::database_config(format!("Invalid SQLite URL: {e}"))
            })?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout_secs))
            // 内存库在最后一个连接关闭时消失
            .idle_timeout(None)
            .connect_with(opt)
            .await
            .map_err(|e| {
                CourseHubError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            CourseHubError::database_connection(format!("Cannot connect to database: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseHubError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite path"
            )))
        }
    }
}

// 日志中隐藏连接串里的密码
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

/// 统一的数据库错误包装
pub(crate) fn db_err(context: &'static str) -> impl Fn(sea_orm::DbErr) -> CourseHubError {
    move |e| CourseHubError::database_operation(format!("{context}: {e}"))
}

// Storage trait 实现
use crate::models::{
    PaginationInfo, PaginationQuery,
    assignments::{
        entities::{Assignment, Rubric},
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest, UpsertRubricRequest},
    },
    billing::{
        entities::{Payment, PaymentStatus},
        requests::PaymentListQuery,
        responses::PaymentListResponse,
    },
    certificates::entities::{
        Certificate, CertificateVerification, CourseCompletion, NewCertificate,
    },
    courses::{
        entities::{Course, CourseModule, CourseOutline, CourseProgress, Lesson},
        requests::{
            CourseListQuery, CreateCourseRequest, CreateLessonRequest, CreateModuleRequest,
            ReorderItem, UpdateCourseRequest, UpdateLessonRequest, UpdateModuleRequest,
        },
        responses::{CourseListResponse, ReorderResult},
    },
    enrollments::{
        entities::{Enrollment, EnrollmentDetail, EnrollmentStatus, RosterEntry},
        responses::RosterListResponse,
    },
    forums::{
        entities::{ForumPost, ForumThread},
        requests::{CreateThreadRequest, UpdateThreadRequest},
        responses::ThreadListResponse,
    },
    mentorship::{
        entities::{
            MentorProfile, MentorshipRequest, MentorshipRequestStatus, MentorshipSession,
        },
        requests::{CreateSessionRequest, UpdateSessionRequest, UpsertMentorProfileRequest},
        responses::MentorListResponse,
    },
    notifications::{
        entities::{NewNotification, Notification},
        responses::NotificationListResponse,
    },
    quizzes::{
        entities::{Quiz, QuizAttempt, QuizGrade},
        requests::{CreateQuizRequest, UpdateQuizRequest},
    },
    submissions::{
        entities::{Submission, SubmissionExportRow, SubmissionReview},
        requests::{
            CreateReviewRequest, CreateSubmissionRequest, SubmissionListQuery,
            SubmitFeedbackRequest,
        },
        responses::SubmissionListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn list_all_users(&self) -> Result<Vec<User>> {
        self.list_all_users_impl().await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 课程模块
    async fn create_course(
        &self,
        instructor_id: i64,
        slug: String,
        course: CreateCourseRequest,
    ) -> Result<Course> {
        self.create_course_impl(instructor_id, slug, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_by_slug(&self, slug: &str) -> Result<Option<Course>> {
        self.get_course_by_slug_impl(slug).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn get_course_outline(&self, course_id: i64) -> Result<Option<CourseOutline>> {
        self.get_course_outline_impl(course_id).await
    }

    // 章节模块
    async fn list_modules(&self, course_id: i64) -> Result<Vec<CourseModule>> {
        self.list_modules_impl(course_id).await
    }

    async fn get_module(&self, course_id: i64, module_id: i64) -> Result<Option<CourseModule>> {
        self.get_module_impl(course_id, module_id).await
    }

    async fn create_module(
        &self,
        course_id: i64,
        module: CreateModuleRequest,
    ) -> Result<CourseModule> {
        self.create_module_impl(course_id, module).await
    }

    async fn update_module(
        &self,
        course_id: i64,
        module_id: i64,
        update: UpdateModuleRequest,
    ) -> Result<Option<CourseModule>> {
        self.update_module_impl(course_id, module_id, update).await
    }

    async fn delete_module(&self, course_id: i64, module_id: i64) -> Result<bool> {
        self.delete_module_impl(course_id, module_id).await
    }

    async fn reorder_modules(
        &self,
        course_id: i64,
        items: &[ReorderItem],
    ) -> Result<Vec<ReorderResult>> {
        self.reorder_modules_impl(course_id, items).await
    }

    // 课时模块
    async fn list_lessons(&self, module_id: i64) -> Result<Vec<Lesson>> {
        self.list_lessons_impl(module_id).await
    }

    async fn get_lesson(&self, course_id: i64, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_impl(course_id, lesson_id).await
    }

    async fn create_lesson(
        &self,
        course_id: i64,
        module_id: i64,
        lesson: CreateLessonRequest,
    ) -> Result<Lesson> {
        self.create_lesson_impl(course_id, module_id, lesson).await
    }

    async fn update_lesson(
        &self,
        course_id: i64,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        self.update_lesson_impl(course_id, lesson_id, update).await
    }

    async fn delete_lesson(&self, course_id: i64, lesson_id: i64) -> Result<bool> {
        self.delete_lesson_impl(course_id, lesson_id).await
    }

    async fn reorder_lessons(
        &self,
        module_id: i64,
        items: &[ReorderItem],
    ) -> Result<Vec<ReorderResult>> {
        self.reorder_lessons_impl(module_id, items).await
    }

    // 学习进度
    async fn mark_lesson_complete(
        &self,
        user_id: i64,
        course_id: i64,
        lesson_id: i64,
    ) -> Result<CourseProgress> {
        self.mark_lesson_complete_impl(user_id, course_id, lesson_id)
            .await
    }

    async fn get_course_progress(&self, user_id: i64, course_id: i64) -> Result<CourseProgress> {
        self.get_course_progress_impl(user_id, course_id).await
    }

    async fn get_course_completion(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<CourseCompletion> {
        self.get_course_completion_impl(user_id, course_id).await
    }

    // 测验模块
    async fn create_quiz(&self, course_id: i64, quiz: CreateQuizRequest) -> Result<Quiz> {
        self.create_quiz_impl(course_id, quiz).await
    }

    async fn get_quiz(&self, course_id: i64, quiz_id: i64) -> Result<Option<Quiz>> {
        self.get_quiz_impl(course_id, quiz_id).await
    }

    async fn list_quizzes(&self, course_id: i64) -> Result<Vec<Quiz>> {
        self.list_quizzes_impl(course_id).await
    }

    async fn update_quiz(
        &self,
        course_id: i64,
        quiz_id: i64,
        update: UpdateQuizRequest,
    ) -> Result<Option<Quiz>> {
        self.update_quiz_impl(course_id, quiz_id, update).await
    }

    async fn delete_quiz(&self, course_id: i64, quiz_id: i64) -> Result<bool> {
        self.delete_quiz_impl(course_id, quiz_id).await
    }

    async fn create_quiz_attempt(
        &self,
        quiz: &Quiz,
        user_id: i64,
        answers: Vec<usize>,
        grade: QuizGrade,
    ) -> Result<QuizAttempt> {
        self.create_quiz_attempt_impl(quiz, user_id, answers, grade)
            .await
    }

    async fn list_quiz_attempts(
        &self,
        quiz_id: i64,
        user_id: Option<i64>,
    ) -> Result<Vec<QuizAttempt>> {
        self.list_quiz_attempts_impl(quiz_id, user_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        course_id: i64,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(course_id, created_by, assignment)
            .await
    }

    async fn get_assignment(
        &self,
        course_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        self.get_assignment_impl(course_id, assignment_id).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments(&self, course_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(course_id).await
    }

    async fn update_assignment(
        &self,
        course_id: i64,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(course_id, assignment_id, update)
            .await
    }

    async fn delete_assignment(&self, course_id: i64, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(course_id, assignment_id).await
    }

    async fn upsert_rubric(
        &self,
        assignment_id: i64,
        rubric: UpsertRubricRequest,
    ) -> Result<Rubric> {
        self.upsert_rubric_impl(assignment_id, rubric).await
    }

    async fn get_rubric(&self, assignment_id: i64) -> Result<Option<Rubric>> {
        self.get_rubric_impl(assignment_id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        submission: CreateSubmissionRequest,
        is_late: bool,
    ) -> Result<Submission> {
        self.create_submission_impl(assignment_id, student_id, submission, is_late)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn list_submission_export_rows(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionExportRow>> {
        self.list_submission_export_rows_impl(assignment_id).await
    }

    async fn create_review(
        &self,
        submission_id: i64,
        reviewer_id: i64,
        review: CreateReviewRequest,
        score: Option<f64>,
    ) -> Result<(SubmissionReview, Submission)> {
        self.create_review_impl(submission_id, reviewer_id, review, score)
            .await
    }

    async fn list_reviews(&self, submission_id: i64) -> Result<Vec<SubmissionReview>> {
        self.list_reviews_impl(submission_id).await
    }

    async fn resubmit_submission(
        &self,
        submission_id: i64,
        feedback: SubmitFeedbackRequest,
    ) -> Result<Submission> {
        self.resubmit_submission_impl(submission_id, feedback).await
    }

    // 选课模块
    async fn enroll_user(&self, user_id: i64, course_id: i64) -> Result<Enrollment> {
        self.enroll_user_impl(user_id, course_id).await
    }

    async fn get_enrollment(&self, user_id: i64, course_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(user_id, course_id).await
    }

    async fn delete_enrollment(&self, user_id: i64, course_id: i64) -> Result<bool> {
        self.delete_enrollment_impl(user_id, course_id).await
    }

    async fn count_course_enrollments(&self, course_id: i64) -> Result<u64> {
        self.count_course_enrollments_impl(course_id).await
    }

    async fn list_user_enrollments(&self, user_id: i64) -> Result<Vec<EnrollmentDetail>> {
        self.list_user_enrollments_impl(user_id).await
    }

    async fn list_course_roster(
        &self,
        course_id: i64,
        pagination: PaginationQuery,
        status: Option<EnrollmentStatus>,
    ) -> Result<RosterListResponse> {
        self.list_course_roster_impl(course_id, pagination, status)
            .await
    }

    async fn list_course_roster_all(&self, course_id: i64) -> Result<Vec<RosterEntry>> {
        self.list_course_roster_all_impl(course_id).await
    }

    // 讨论区模块
    async fn create_thread(
        &self,
        course_id: i64,
        author_id: i64,
        thread: CreateThreadRequest,
    ) -> Result<ForumThread> {
        self.create_thread_impl(course_id, author_id, thread).await
    }

    async fn get_thread(&self, course_id: i64, thread_id: i64) -> Result<Option<ForumThread>> {
        self.get_thread_impl(course_id, thread_id).await
    }

    async fn list_threads(
        &self,
        course_id: i64,
        pagination: PaginationQuery,
        search: Option<String>,
    ) -> Result<ThreadListResponse> {
        self.list_threads_impl(course_id, pagination, search).await
    }

    async fn update_thread(
        &self,
        thread_id: i64,
        update: UpdateThreadRequest,
    ) -> Result<Option<ForumThread>> {
        self.update_thread_impl(thread_id, update).await
    }

    async fn delete_thread(&self, thread_id: i64) -> Result<bool> {
        self.delete_thread_impl(thread_id).await
    }

    async fn create_post(
        &self,
        thread_id: i64,
        author_id: i64,
        body: String,
        allow_locked: bool,
    ) -> Result<ForumPost> {
        self.create_post_impl(thread_id, author_id, body, allow_locked)
            .await
    }

    async fn get_post(&self, thread_id: i64, post_id: i64) -> Result<Option<ForumPost>> {
        self.get_post_impl(thread_id, post_id).await
    }

    async fn list_posts(
        &self,
        thread_id: i64,
        pagination: PaginationQuery,
    ) -> Result<(Vec<ForumPost>, PaginationInfo)> {
        self.list_posts_impl(thread_id, pagination).await
    }

    async fn delete_post(&self, thread_id: i64, post_id: i64) -> Result<bool> {
        self.delete_post_impl(thread_id, post_id).await
    }

    // 导师辅导模块
    async fn upsert_mentor_profile(
        &self,
        user_id: i64,
        profile: UpsertMentorProfileRequest,
    ) -> Result<MentorProfile> {
        self.upsert_mentor_profile_impl(user_id, profile).await
    }

    async fn get_mentor_profile(&self, profile_id: i64) -> Result<Option<MentorProfile>> {
        self.get_mentor_profile_impl(profile_id).await
    }

    async fn get_mentor_profile_by_user(&self, user_id: i64) -> Result<Option<MentorProfile>> {
        self.get_mentor_profile_by_user_impl(user_id).await
    }

    async fn list_mentor_profiles(
        &self,
        pagination: PaginationQuery,
        search: Option<String>,
    ) -> Result<MentorListResponse> {
        self.list_mentor_profiles_impl(pagination, search).await
    }

    async fn create_mentorship_request(
        &self,
        profile: &MentorProfile,
        student_id: i64,
        message: Option<String>,
    ) -> Result<MentorshipRequest> {
        self.create_mentorship_request_impl(profile, student_id, message)
            .await
    }

    async fn get_mentorship_request(&self, request_id: i64) -> Result<Option<MentorshipRequest>> {
        self.get_mentorship_request_impl(request_id).await
    }

    async fn list_mentorship_requests(
        &self,
        mentor_profile_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<MentorshipRequest>> {
        self.list_mentorship_requests_impl(mentor_profile_id, student_id)
            .await
    }

    async fn respond_mentorship_request(
        &self,
        request_id: i64,
        status: MentorshipRequestStatus,
        response_note: Option<String>,
    ) -> Result<MentorshipRequest> {
        self.respond_mentorship_request_impl(request_id, status, response_note)
            .await
    }

    async fn has_accepted_mentorship(&self, mentor_user_id: i64, student_id: i64) -> Result<bool> {
        self.has_accepted_mentorship_impl(mentor_user_id, student_id)
            .await
    }

    async fn create_session(
        &self,
        request: &MentorshipRequest,
        session: CreateSessionRequest,
    ) -> Result<MentorshipSession> {
        self.create_session_impl(request, session).await
    }

    async fn get_session(&self, session_id: i64) -> Result<Option<MentorshipSession>> {
        self.get_session_impl(session_id).await
    }

    async fn list_sessions(
        &self,
        mentor_profile_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<MentorshipSession>> {
        self.list_sessions_impl(mentor_profile_id, student_id).await
    }

    async fn update_session(
        &self,
        session_id: i64,
        update: UpdateSessionRequest,
    ) -> Result<MentorshipSession> {
        self.update_session_impl(session_id, update).await
    }

    // 支付模块
    async fn create_or_reuse_payment(&self, user_id: i64, course: &Course) -> Result<Payment> {
        self.create_or_reuse_payment_impl(user_id, course).await
    }

    async fn get_payment(&self, payment_id: i64) -> Result<Option<Payment>> {
        self.get_payment_impl(payment_id).await
    }

    async fn has_completed_payment(&self, user_id: i64, course_id: i64) -> Result<bool> {
        self.has_completed_payment_impl(user_id, course_id).await
    }

    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse> {
        self.list_payments_with_pagination_impl(query).await
    }

    async fn list_all_payments(&self) -> Result<Vec<Payment>> {
        self.list_all_payments_impl().await
    }

    async fn apply_payment_event(
        &self,
        payment_id: i64,
        status: PaymentStatus,
        provider_ref: Option<String>,
    ) -> Result<(Payment, bool)> {
        self.apply_payment_event_impl(payment_id, status, provider_ref)
            .await
    }

    async fn refund_payment(&self, payment_id: i64) -> Result<Payment> {
        self.refund_payment_impl(payment_id).await
    }

    // 证书模块
    async fn get_certificate_for(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Option<Certificate>> {
        self.get_certificate_for_impl(user_id, course_id).await
    }

    async fn issue_certificate(&self, certificate: NewCertificate) -> Result<Certificate> {
        self.issue_certificate_impl(certificate).await
    }

    async fn list_user_certificates(&self, user_id: i64) -> Result<Vec<Certificate>> {
        self.list_user_certificates_impl(user_id).await
    }

    async fn get_certificate_verification(
        &self,
        verification_code: &str,
    ) -> Result<Option<CertificateVerification>> {
        self.get_certificate_verification_impl(verification_code)
            .await
    }

    // 通知模块
    async fn create_notification(&self, notification: NewNotification) -> Result<Notification> {
        self.create_notification_impl(notification).await
    }

    async fn list_notifications(
        &self,
        user_id: i64,
        pagination: PaginationQuery,
        unread_only: bool,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_impl(user_id, pagination, unread_only)
            .await
    }

    async fn count_unread_notifications(&self, user_id: i64) -> Result<i64> {
        self.count_unread_notifications_impl(user_id).await
    }

    async fn mark_notification_read(&self, user_id: i64, notification_id: i64) -> Result<bool> {
        self.mark_notification_read_impl(user_id, notification_id)
            .await
    }

    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_read_impl(user_id).await
    }

    async fn delete_notification(&self, user_id: i64, notification_id: i64) -> Result<bool> {
        self.delete_notification_impl(user_id, notification_id)
            .await
    }

    async fn ping(&self) -> Result<bool> {
        Ok(self.db.ping().await.is_ok())
    }
}
