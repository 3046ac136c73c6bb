use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    /// 提交状态
    SubmissionStatus {
        Submitted => "submitted",
        RevisionRequested => "revision_requested",
        Resubmitted => "resubmitted",
        Graded => "graded",
    }
}

string_enum! {
    /// 评审结论
    ReviewDecision {
        Graded => "graded",
        RevisionRequested => "revision_requested",
    }
}

impl From<ReviewDecision> for SubmissionStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Graded => SubmissionStatus::Graded,
            ReviewDecision::RevisionRequested => SubmissionStatus::RevisionRequested,
        }
    }
}

// 作业提交
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: String,
    pub attachment_url: Option<String>,
    pub status: SubmissionStatus,
    pub is_late: bool,
    pub score: Option<f64>,
    pub revision_count: i32,
    pub student_note: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 单项标准得分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CriterionScore {
    pub criterion: String,
    pub score: f64,
}

// 评审记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReview {
    pub id: i64,
    pub submission_id: i64,
    pub reviewer_id: i64,
    pub decision: ReviewDecision,
    pub score: Option<f64>,
    pub criterion_scores: Vec<CriterionScore>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

// 导出用的提交行
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionExportRow {
    pub submission_id: i64,
    pub student_id: i64,
    pub username: String,
    pub status: SubmissionStatus,
    pub is_late: bool,
    pub score: Option<f64>,
    pub revision_count: i32,
    pub submitted_at: DateTime<Utc>,
}
