use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 测验题目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// 学员视图中隐藏
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<usize>,
    pub points: u32,
}

impl QuizQuestion {
    pub fn validate(&self, index: usize) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err(format!("Question {} prompt must not be empty", index + 1));
        }
        if self.options.len() < 2 {
            return Err(format!(
                "Question {} must have at least 2 options",
                index + 1
            ));
        }
        match self.correct_option {
            Some(opt) if opt < self.options.len() => {}
            Some(_) => {
                return Err(format!(
                    "Question {} correct option is out of range",
                    index + 1
                ));
            }
            None => {
                return Err(format!(
                    "Question {} must specify a correct option",
                    index + 1
                ));
            }
        }
        if self.points == 0 {
            return Err(format!("Question {} points must be positive", index + 1));
        }
        Ok(())
    }
}

// 测验实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub course_id: i64,
    pub module_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    /// 及格线（百分制）
    pub passing_score: i32,
    pub max_attempts: Option<i32>,
    pub time_limit_minutes: Option<i32>,
    pub questions: Vec<QuizQuestion>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 单次作答的评分结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizGrade {
    pub score: f64,
    pub passed: bool,
}

impl Quiz {
    /// 去掉正确答案，供学员查看
    pub fn without_answers(mut self) -> Self {
        for q in &mut self.questions {
            q.correct_option = None;
        }
        self
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            id: self.id,
            module_id: self.module_id,
            title: self.title.clone(),
            passing_score: self.passing_score,
            max_attempts: self.max_attempts,
            question_count: self.questions.len(),
        }
    }

    /// 按题目分值评分，得分为百分制并保留两位小数
    pub fn grade(&self, answers: &[usize]) -> Result<QuizGrade, String> {
        if answers.len() != self.questions.len() {
            return Err(format!(
                "Expected {} answers, got {}",
                self.questions.len(),
                answers.len()
            ));
        }

        let mut total = 0u64;
        let mut earned = 0u64;
        for (question, answer) in self.questions.iter().zip(answers) {
            if *answer >= question.options.len() {
                return Err(format!("Answer {answer} is out of range"));
            }
            total += question.points as u64;
            if question.correct_option == Some(*answer) {
                earned += question.points as u64;
            }
        }

        let score = if total == 0 {
            0.0
        } else {
            ((earned as f64 / total as f64) * 10000.0).round() / 100.0
        };
        Ok(QuizGrade {
            score,
            passed: score >= self.passing_score as f64,
        })
    }
}

// 大纲中的测验摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: i64,
    pub module_id: Option<i64>,
    pub title: String,
    pub passing_score: i32,
    pub max_attempts: Option<i32>,
    pub question_count: usize,
}

// 测验作答记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub user_id: i64,
    pub answers: Vec<usize>,
    pub score: f64,
    pub passed: bool,
    pub attempt_number: i32,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize, points: u32) -> QuizQuestion {
        QuizQuestion {
            prompt: "Q".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_option: Some(correct),
            points,
        }
    }

    fn quiz(passing_score: i32) -> Quiz {
        let now = Utc::now();
        Quiz {
            id: 1,
            course_id: 1,
            module_id: None,
            title: "Quiz".into(),
            description: None,
            passing_score,
            max_attempts: None,
            time_limit_minutes: None,
            questions: vec![question(0, 1), question(1, 2), question(2, 3)],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_grade_weights_points() {
        let grade = quiz(50).grade(&[0, 0, 2]).unwrap();
        // 1 + 3 = 4 / 6
        assert_eq!(grade.score, 66.67);
        assert!(grade.passed);
    }

    #[test]
    fn test_grade_passing_boundary_is_inclusive() {
        let grade = quiz(50).grade(&[1, 0, 2]).unwrap();
        assert_eq!(grade.score, 50.0);
        assert!(grade.passed);
        assert!(!quiz(51).grade(&[1, 0, 2]).unwrap().passed);
    }

    #[test]
    fn test_grade_rejects_length_mismatch() {
        assert!(quiz(50).grade(&[0, 1]).is_err());
    }

    #[test]
    fn test_grade_rejects_out_of_range_answer() {
        assert!(quiz(50).grade(&[0, 1, 9]).is_err());
    }

    #[test]
    fn test_without_answers_hides_correct_option() {
        let q = quiz(50).without_answers();
        assert!(q.questions.iter().all(|q| q.correct_option.is_none()));
        let json = serde_json::to_string(&q).unwrap();
        assert!(!json.contains("correct_option"));
    }

    #[test]
    fn test_question_validation() {
        assert!(question(0, 1).validate(0).is_ok());
        assert!(question(5, 1).validate(0).is_err());
        assert!(question(0, 0).validate(0).is_err());
        let mut q = question(0, 1);
        q.options.truncate(1);
        assert!(q.validate(0).is_err());
    }
}
