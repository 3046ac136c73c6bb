//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_coursehub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CourseHubError {
            $($variant(String),)*
        }

        impl CourseHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CourseHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CourseHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CourseHubError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CourseHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CourseHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_coursehub_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Resource Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    ExternalService("E014", "External Service Error"),
    Mail("E015", "Mail Delivery Error"),
}

impl CourseHubError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束冲突（不同数据库的报错文本不同）
    pub fn is_unique_violation(&self) -> bool {
        let msg = self.message();
        msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
    }
}

impl fmt::Display for CourseHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CourseHubError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CourseHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        CourseHubError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CourseHubError {
    fn from(err: std::io::Error) -> Self {
        CourseHubError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CourseHubError {
    fn from(err: serde_json::Error) -> Self {
        CourseHubError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CourseHubError {
    fn from(err: chrono::ParseError) -> Self {
        CourseHubError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for CourseHubError {
    fn from(err: reqwest::Error) -> Self {
        CourseHubError::ExternalService(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CourseHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CourseHubError::cache_connection("test").code(), "E001");
        assert_eq!(CourseHubError::database_config("test").code(), "E003");
        assert_eq!(CourseHubError::validation("test").code(), "E007");
        assert_eq!(CourseHubError::conflict("test").code(), "E010");
        assert_eq!(CourseHubError::authentication("test").code(), "E012");
        assert_eq!(CourseHubError::external_service("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CourseHubError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            CourseHubError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CourseHubError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = CourseHubError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }

    #[test]
    fn test_unique_violation_detection() {
        let sqlite = CourseHubError::database_operation(
            "Execution Error: UNIQUE constraint failed: users.username",
        );
        let pg = CourseHubError::database_operation(
            "duplicate key value violates unique constraint \"users_email_key\"",
        );
        let other = CourseHubError::database_operation("no such table: users");
        assert!(sqlite.is_unique_violation());
        assert!(pg.is_unique_violation());
        assert!(!other.is_unique_violation());
    }
}
