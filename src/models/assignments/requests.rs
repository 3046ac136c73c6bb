use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::entities::RubricCriterion;

#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub module_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub max_score: f64,
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub allow_late: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub max_score: Option<f64>,
    pub due_at: Option<DateTime<Utc>>,
    pub allow_late: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertRubricRequest {
    pub title: String,
    pub criteria: Vec<RubricCriterion>,
}
