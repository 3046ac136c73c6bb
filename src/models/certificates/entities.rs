use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 证书
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub enrollment_id: i64,
    pub credential_id: String,
    pub verification_url: Option<String>,
    pub verification_code: String,
    pub issued_at: DateTime<Utc>,
}

// 公开验证结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateVerification {
    pub valid: bool,
    pub verification_code: String,
    pub credential_id: String,
    pub verification_url: Option<String>,
    pub course_title: String,
    pub recipient_name: String,
    pub issued_at: DateTime<Utc>,
}

// 结业判定所需的学习情况
#[derive(Debug, Clone, PartialEq)]
pub struct CourseCompletion {
    pub lessons_total: u64,
    pub lessons_completed: u64,
    pub quizzes_total: u64,
    pub quizzes_passed: u64,
}

impl CourseCompletion {
    /// 所有课时已完成且所有测验均已通过
    pub fn is_complete(&self) -> bool {
        self.lessons_completed >= self.lessons_total && self.quizzes_passed >= self.quizzes_total
    }

    pub fn missing_summary(&self) -> String {
        format!(
            "{}/{} lessons completed, {}/{} quizzes passed",
            self.lessons_completed, self.lessons_total, self.quizzes_passed, self.quizzes_total
        )
    }
}

// 新证书入库参数
#[derive(Debug, Clone)]
pub struct NewCertificate {
    pub user_id: i64,
    pub course_id: i64,
    pub enrollment_id: i64,
    pub credential_id: String,
    pub verification_url: Option<String>,
    pub verification_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_requires_lessons_and_quizzes() {
        let mut c = CourseCompletion {
            lessons_total: 3,
            lessons_completed: 3,
            quizzes_total: 1,
            quizzes_passed: 0,
        };
        assert!(!c.is_complete());
        c.quizzes_passed = 1;
        assert!(c.is_complete());
        c.lessons_completed = 2;
        assert!(!c.is_complete());
        assert_eq!(c.missing_summary(), "2/3 lessons completed, 1/1 quizzes passed");
    }
}
