use crate::models::{
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
use crate::models::{PaginationInfo, PaginationQuery};

use crate::errors::Result;
use std::sync::Arc;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 导出全部用户
    async fn list_all_users(&self) -> Result<Vec<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    async fn create_course(
        &self,
        instructor_id: i64,
        slug: String,
        course: CreateCourseRequest,
    ) -> Result<Course>;
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    async fn get_course_by_slug(&self, slug: &str) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 课程大纲：章节、课时、测验与作业
    async fn get_course_outline(&self, course_id: i64) -> Result<Option<CourseOutline>>;

    /// 章节管理方法
    async fn list_modules(&self, course_id: i64) -> Result<Vec<CourseModule>>;
    async fn get_module(&self, course_id: i64, module_id: i64) -> Result<Option<CourseModule>>;
    // 新章节排在末尾
    async fn create_module(
        &self,
        course_id: i64,
        module: CreateModuleRequest,
    ) -> Result<CourseModule>;
    async fn update_module(
        &self,
        course_id: i64,
        module_id: i64,
        update: UpdateModuleRequest,
    ) -> Result<Option<CourseModule>>;
    async fn delete_module(&self, course_id: i64, module_id: i64) -> Result<bool>;
    // 在同一事务内批量调整章节顺序
    async fn reorder_modules(
        &self,
        course_id: i64,
        items: &[ReorderItem],
    ) -> Result<Vec<ReorderResult>>;

    /// 课时管理方法
    async fn list_lessons(&self, module_id: i64) -> Result<Vec<Lesson>>;
    async fn get_lesson(&self, course_id: i64, lesson_id: i64) -> Result<Option<Lesson>>;
    async fn create_lesson(
        &self,
        course_id: i64,
        module_id: i64,
        lesson: CreateLessonRequest,
    ) -> Result<Lesson>;
    async fn update_lesson(
        &self,
        course_id: i64,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>>;
    async fn delete_lesson(&self, course_id: i64, lesson_id: i64) -> Result<bool>;
    async fn reorder_lessons(
        &self,
        module_id: i64,
        items: &[ReorderItem],
    ) -> Result<Vec<ReorderResult>>;

    /// 学习进度
    // 标记课时完成（幂等）
    async fn mark_lesson_complete(
        &self,
        user_id: i64,
        course_id: i64,
        lesson_id: i64,
    ) -> Result<CourseProgress>;
    async fn get_course_progress(&self, user_id: i64, course_id: i64) -> Result<CourseProgress>;
    async fn get_course_completion(&self, user_id: i64, course_id: i64)
    -> Result<CourseCompletion>;

    /// 测验管理方法
    async fn create_quiz(&self, course_id: i64, quiz: CreateQuizRequest) -> Result<Quiz>;
    async fn get_quiz(&self, course_id: i64, quiz_id: i64) -> Result<Option<Quiz>>;
    async fn list_quizzes(&self, course_id: i64) -> Result<Vec<Quiz>>;
    async fn update_quiz(
        &self,
        course_id: i64,
        quiz_id: i64,
        update: UpdateQuizRequest,
    ) -> Result<Option<Quiz>>;
    async fn delete_quiz(&self, course_id: i64, quiz_id: i64) -> Result<bool>;
    // 记录作答，超过次数上限时返回冲突
    async fn create_quiz_attempt(
        &self,
        quiz: &Quiz,
        user_id: i64,
        answers: Vec<usize>,
        grade: QuizGrade,
    ) -> Result<QuizAttempt>;
    async fn list_quiz_attempts(
        &self,
        quiz_id: i64,
        user_id: Option<i64>,
    ) -> Result<Vec<QuizAttempt>>;

    /// 作业与评分量规
    async fn create_assignment(
        &self,
        course_id: i64,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment(
        &self,
        course_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Assignment>>;
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments(&self, course_id: i64) -> Result<Vec<Assignment>>;
    async fn update_assignment(
        &self,
        course_id: i64,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, course_id: i64, assignment_id: i64) -> Result<bool>;
    async fn upsert_rubric(&self, assignment_id: i64, rubric: UpsertRubricRequest)
    -> Result<Rubric>;
    async fn get_rubric(&self, assignment_id: i64) -> Result<Option<Rubric>>;

    /// 作业提交与评审
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        submission: CreateSubmissionRequest,
        is_late: bool,
    ) -> Result<Submission>;
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    async fn list_submission_export_rows(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionExportRow>>;
    // 写入评审并同步提交状态
    async fn create_review(
        &self,
        submission_id: i64,
        reviewer_id: i64,
        review: CreateReviewRequest,
        score: Option<f64>,
    ) -> Result<(SubmissionReview, Submission)>;
    async fn list_reviews(&self, submission_id: i64) -> Result<Vec<SubmissionReview>>;
    // 学员按修改意见重新提交
    async fn resubmit_submission(
        &self,
        submission_id: i64,
        feedback: SubmitFeedbackRequest,
    ) -> Result<Submission>;

    /// 选课管理方法
    async fn enroll_user(&self, user_id: i64, course_id: i64) -> Result<Enrollment>;
    async fn get_enrollment(&self, user_id: i64, course_id: i64) -> Result<Option<Enrollment>>;
    async fn delete_enrollment(&self, user_id: i64, course_id: i64) -> Result<bool>;
    async fn count_course_enrollments(&self, course_id: i64) -> Result<u64>;
    async fn list_user_enrollments(&self, user_id: i64) -> Result<Vec<EnrollmentDetail>>;
    async fn list_course_roster(
        &self,
        course_id: i64,
        pagination: PaginationQuery,
        status: Option<EnrollmentStatus>,
    ) -> Result<RosterListResponse>;
    async fn list_course_roster_all(&self, course_id: i64) -> Result<Vec<RosterEntry>>;

    /// 讨论区
    async fn create_thread(
        &self,
        course_id: i64,
        author_id: i64,
        thread: CreateThreadRequest,
    ) -> Result<ForumThread>;
    async fn get_thread(&self, course_id: i64, thread_id: i64) -> Result<Option<ForumThread>>;
    async fn list_threads(
        &self,
        course_id: i64,
        pagination: PaginationQuery,
        search: Option<String>,
    ) -> Result<ThreadListResponse>;
    async fn update_thread(
        &self,
        thread_id: i64,
        update: UpdateThreadRequest,
    ) -> Result<Option<ForumThread>>;
    async fn delete_thread(&self, thread_id: i64) -> Result<bool>;
    // 发帖并更新主题的回复数与活跃时间；锁定主题仅在 allow_locked 时可回复
    async fn create_post(
        &self,
        thread_id: i64,
        author_id: i64,
        body: String,
        allow_locked: bool,
    ) -> Result<ForumPost>;
    async fn get_post(&self, thread_id: i64, post_id: i64) -> Result<Option<ForumPost>>;
    async fn list_posts(
        &self,
        thread_id: i64,
        pagination: PaginationQuery,
    ) -> Result<(Vec<ForumPost>, PaginationInfo)>;
    async fn delete_post(&self, thread_id: i64, post_id: i64) -> Result<bool>;

    /// 导师辅导
    async fn upsert_mentor_profile(
        &self,
        user_id: i64,
        profile: UpsertMentorProfileRequest,
    ) -> Result<MentorProfile>;
    async fn get_mentor_profile(&self, profile_id: i64) -> Result<Option<MentorProfile>>;
    async fn get_mentor_profile_by_user(&self, user_id: i64) -> Result<Option<MentorProfile>>;
    async fn list_mentor_profiles(
        &self,
        pagination: PaginationQuery,
        search: Option<String>,
    ) -> Result<MentorListResponse>;
    // 创建申请：校验重复申请与名额
    async fn create_mentorship_request(
        &self,
        profile: &MentorProfile,
        student_id: i64,
        message: Option<String>,
    ) -> Result<MentorshipRequest>;
    async fn get_mentorship_request(&self, request_id: i64) -> Result<Option<MentorshipRequest>>;
    async fn list_mentorship_requests(
        &self,
        mentor_profile_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<MentorshipRequest>>;
    async fn respond_mentorship_request(
        &self,
        request_id: i64,
        status: MentorshipRequestStatus,
        response_note: Option<String>,
    ) -> Result<MentorshipRequest>;
    // 导师（按用户）与学员之间是否存在已接受的辅导关系
    async fn has_accepted_mentorship(&self, mentor_user_id: i64, student_id: i64) -> Result<bool>;
    // 创建会话：同一导师的已排期会话不能重叠
    async fn create_session(
        &self,
        request: &MentorshipRequest,
        session: CreateSessionRequest,
    ) -> Result<MentorshipSession>;
    async fn get_session(&self, session_id: i64) -> Result<Option<MentorshipSession>>;
    async fn list_sessions(
        &self,
        mentor_profile_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<MentorshipSession>>;
    async fn update_session(
        &self,
        session_id: i64,
        update: UpdateSessionRequest,
    ) -> Result<MentorshipSession>;

    /// 支付
    // 复用已有的待支付订单，否则新建
    async fn create_or_reuse_payment(&self, user_id: i64, course: &Course) -> Result<Payment>;
    async fn get_payment(&self, payment_id: i64) -> Result<Option<Payment>>;
    async fn has_completed_payment(&self, user_id: i64, course_id: i64) -> Result<bool>;
    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse>;
    async fn list_all_payments(&self) -> Result<Vec<Payment>>;
    // 回调：支付完成时在同一事务内选课并通知；返回是否新选课
    async fn apply_payment_event(
        &self,
        payment_id: i64,
        status: PaymentStatus,
        provider_ref: Option<String>,
    ) -> Result<(Payment, bool)>;
    async fn refund_payment(&self, payment_id: i64) -> Result<Payment>;

    /// 证书
    async fn get_certificate_for(&self, user_id: i64, course_id: i64)
    -> Result<Option<Certificate>>;
    // 写入证书、结课并通知，三步在同一事务内
    async fn issue_certificate(&self, certificate: NewCertificate) -> Result<Certificate>;
    async fn list_user_certificates(&self, user_id: i64) -> Result<Vec<Certificate>>;
    async fn get_certificate_verification(
        &self,
        verification_code: &str,
    ) -> Result<Option<CertificateVerification>>;

    /// 通知
    async fn create_notification(&self, notification: NewNotification) -> Result<Notification>;
    async fn list_notifications(
        &self,
        user_id: i64,
        pagination: PaginationQuery,
        unread_only: bool,
    ) -> Result<NotificationListResponse>;
    async fn count_unread_notifications(&self, user_id: i64) -> Result<i64>;
    async fn mark_notification_read(&self, user_id: i64, notification_id: i64) -> Result<bool>;
    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<i64>;
    async fn delete_notification(&self, user_id: i64, notification_id: i64) -> Result<bool>;

    /// 系统
    // 数据库连通性检查
    async fn ping(&self) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
