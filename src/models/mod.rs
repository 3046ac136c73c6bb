/// 定义以字符串形式存储和传输的枚举
///
/// 生成 serde 实现、`as_str()`、`Display` 与 `FromStr`。
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }
    };
}

pub mod assignments;
pub mod auth;
pub mod certificates;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod forums;
pub mod mentorship;
pub mod billing;
pub mod notifications;
pub mod quizzes;
pub mod submissions;
pub mod system;
pub mod users;

pub use common::response::ApiResponse;
pub use common::{PaginationInfo, PaginationQuery};
pub use system::responses::AppStartTime;

use serde::{Deserialize, Serialize};

/// 业务错误码，按领域分组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,
    RateLimitExceeded = 1006,
    InternalServerError = 1007,
    ExternalServiceError = 1008,

    // 认证与用户
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    UserNameAlreadyExists = 2005,
    UserEmailAlreadyExists = 2006,
    UserNotFound = 2007,
    UserUpdateFailed = 2008,
    UserDeleteFailed = 2009,
    UserSuspended = 2010,
    CanNotDeleteCurrentUser = 2011,

    // 课程、章节、课时
    CourseNotFound = 3000,
    CourseAlreadyExists = 3001,
    CoursePermissionDenied = 3002,
    CourseNotPublished = 3003,
    CourseHasEnrollments = 3004,
    ModuleNotFound = 3005,
    ModuleReorderFailed = 3006,
    LessonNotFound = 3007,
    LessonReorderFailed = 3008,

    // 测验
    QuizNotFound = 4000,
    QuizAttemptsExhausted = 4001,
    QuizAnswerInvalid = 4002,
    QuizInvalid = 4003,

    // 作业与提交
    AssignmentNotFound = 5000,
    SubmissionNotFound = 5001,
    SubmissionStatusInvalid = 5002,
    SubmissionAlreadyExists = 5003,
    SubmissionDeadlinePassed = 5004,
    RubricNotFound = 5005,
    RubricInvalid = 5006,
    ReviewInvalid = 5007,

    // 选课
    EnrollmentNotFound = 6000,
    AlreadyEnrolled = 6001,
    NotEnrolled = 6002,
    PaymentRequired = 6003,
    EnrollmentCompleted = 6004,

    // 论坛
    ThreadNotFound = 7000,
    ThreadLocked = 7001,
    PostNotFound = 7002,

    // 导师
    MentorProfileNotFound = 8000,
    MentorshipRequestNotFound = 8001,
    MentorshipRequestDuplicate = 8002,
    MentorshipStatusInvalid = 8003,
    MentorNotAccepting = 8004,
    SessionNotFound = 8005,
    SessionConflict = 8006,
    SessionInvalid = 8007,

    // 账单
    PaymentNotFound = 9000,
    PaymentStatusInvalid = 9001,
    WebhookSignatureInvalid = 9002,
    CourseIsFree = 9003,

    // 证书
    CertificateNotFound = 10000,
    CertificateAlreadyIssued = 10001,
    CourseNotCompleted = 10002,
    CertificateIssueFailed = 10003,

    // 通知
    NotificationNotFound = 11000,
}
