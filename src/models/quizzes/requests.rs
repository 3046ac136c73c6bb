use serde::Deserialize;

use super::entities::QuizQuestion;

#[derive(Debug, Deserialize)]
pub struct CreateQuizRequest {
    pub module_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub passing_score: i32,
    pub max_attempts: Option<i32>,
    pub time_limit_minutes: Option<i32>,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateQuizRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub passing_score: Option<i32>,
    pub max_attempts: Option<i32>,
    pub time_limit_minutes: Option<i32>,
    pub questions: Option<Vec<QuizQuestion>>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAttemptRequest {
    pub answers: Vec<usize>,
}

/// 校验测验设置与题目
pub fn validate_quiz_fields(
    title: Option<&str>,
    passing_score: Option<i32>,
    max_attempts: Option<i32>,
    questions: Option<&[QuizQuestion]>,
) -> Result<(), String> {
    if let Some(title) = title
        && title.trim().is_empty()
    {
        return Err("Quiz title must not be empty".into());
    }
    if let Some(score) = passing_score
        && !(0..=100).contains(&score)
    {
        return Err("Passing score must be between 0 and 100".into());
    }
    if let Some(attempts) = max_attempts
        && attempts < 1
    {
        return Err("Max attempts must be at least 1".into());
    }
    if let Some(questions) = questions {
        if questions.is_empty() {
            return Err("Quiz must contain at least one question".into());
        }
        for (i, q) in questions.iter().enumerate() {
            q.validate(i)?;
        }
    }
    Ok(())
}
