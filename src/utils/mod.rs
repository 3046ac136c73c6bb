pub mod csv_export;
pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod signature;
pub mod sql;
pub mod validate;

pub use csv_export::{csv_attachment, to_csv};
pub use extractor::{
    SafeAssignmentIdI64, SafeCourseIdI64, SafeLessonIdI64, SafeModuleIdI64,
    SafeNotificationIdI64, SafePaymentIdI64, SafePostIdI64, SafeProfileIdI64, SafeQuizIdI64,
    SafeRequestIdI64, SafeSessionIdI64, SafeSubmissionIdI64, SafeThreadIdI64, SafeUserIdI64,
    SafeVerificationCode,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
