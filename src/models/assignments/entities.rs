use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::submissions::entities::CriterionScore;

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub module_id: Option<i64>,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub max_score: f64,
    pub due_at: Option<DateTime<Utc>>,
    pub allow_late: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at.is_some_and(|due| now > due)
    }
}

// 评分量规中的单项标准
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RubricCriterion {
    pub name: String,
    pub description: Option<String>,
    pub weight: f64,
    pub max_points: f64,
}

// 评分量规
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    pub id: i64,
    pub assignment_id: i64,
    pub title: String,
    pub criteria: Vec<RubricCriterion>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 校验量规标准：非空、名称唯一、权重与满分为正
pub fn validate_criteria(criteria: &[RubricCriterion]) -> Result<(), String> {
    if criteria.is_empty() {
        return Err("Rubric must contain at least one criterion".into());
    }
    let mut names = HashSet::new();
    for c in criteria {
        let name = c.name.trim();
        if name.is_empty() {
            return Err("Criterion name must not be empty".into());
        }
        if !names.insert(name.to_lowercase()) {
            return Err(format!("Duplicate criterion name '{name}'"));
        }
        if !(c.weight > 0.0) {
            return Err(format!("Criterion '{name}' weight must be positive"));
        }
        if !(c.max_points > 0.0) {
            return Err(format!("Criterion '{name}' max points must be positive"));
        }
    }
    Ok(())
}

impl Rubric {
    /// 加权计分：Σ wᵢ·sᵢ/maxᵢ / Σ wᵢ × max_score，保留两位小数
    ///
    /// 每一项标准都必须给分，且分数在 0 到该项满分之间。
    pub fn score(&self, scores: &[CriterionScore], max_score: f64) -> Result<f64, String> {
        let mut by_name: HashMap<String, f64> = HashMap::new();
        for s in scores {
            if by_name.insert(s.criterion.trim().to_lowercase(), s.score).is_some() {
                return Err(format!("Criterion '{}' scored more than once", s.criterion));
            }
        }

        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        for c in &self.criteria {
            let Some(&s) = by_name.get(&c.name.trim().to_lowercase()) else {
                return Err(format!("Missing score for criterion '{}'", c.name));
            };
            if !(0.0..=c.max_points).contains(&s) {
                return Err(format!(
                    "Score for criterion '{}' must be between 0 and {}",
                    c.name, c.max_points
                ));
            }
            weighted += c.weight * s / c.max_points;
            total_weight += c.weight;
        }

        if by_name.len() != self.criteria.len() {
            return Err("Scores reference unknown criteria".into());
        }
        if total_weight <= 0.0 {
            return Err("Rubric has no weighted criteria".into());
        }

        Ok(((weighted / total_weight * max_score) * 100.0).round() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(name: &str, weight: f64, max_points: f64) -> RubricCriterion {
        RubricCriterion {
            name: name.into(),
            description: None,
            weight,
            max_points,
        }
    }

    fn rubric() -> Rubric {
        let now = Utc::now();
        Rubric {
            id: 1,
            assignment_id: 1,
            title: "Essay".into(),
            criteria: vec![criterion("Clarity", 1.0, 10.0), criterion("Depth", 3.0, 5.0)],
            created_at: now,
            updated_at: now,
        }
    }

    fn score(name: &str, score: f64) -> CriterionScore {
        CriterionScore {
            criterion: name.into(),
            score,
        }
    }

    #[test]
    fn test_weighted_score() {
        // (1*5/10 + 3*5/5) / 4 * 100 = 87.5
        let s = rubric()
            .score(&[score("Clarity", 5.0), score("Depth", 5.0)], 100.0)
            .unwrap();
        assert_eq!(s, 87.5);
    }

    #[test]
    fn test_score_is_case_insensitive_on_names() {
        let s = rubric()
            .score(&[score("clarity", 10.0), score("DEPTH", 0.0)], 20.0)
            .unwrap();
        assert_eq!(s, 5.0);
    }

    #[test]
    fn test_missing_criterion_rejected() {
        assert!(rubric().score(&[score("Clarity", 5.0)], 100.0).is_err());
    }

    #[test]
    fn test_unknown_criterion_rejected() {
        let err = rubric()
            .score(
                &[score("Clarity", 5.0), score("Depth", 5.0), score("Style", 1.0)],
                100.0,
            )
            .unwrap_err();
        assert!(err.contains("unknown"));
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        assert!(
            rubric()
                .score(&[score("Clarity", 11.0), score("Depth", 5.0)], 100.0)
                .is_err()
        );
    }

    #[test]
    fn test_validate_criteria() {
        assert!(validate_criteria(&rubric().criteria).is_ok());
        assert!(validate_criteria(&[]).is_err());
        assert!(validate_criteria(&[criterion("A", 0.0, 1.0)]).is_err());
        assert!(validate_criteria(&[criterion("A", 1.0, -1.0)]).is_err());
        assert!(validate_criteria(&[criterion("A", 1.0, 1.0), criterion("a", 1.0, 1.0)]).is_err());
    }

    #[test]
    fn test_past_due() {
        let now = Utc::now();
        let mut a = Assignment {
            id: 1,
            course_id: 1,
            module_id: None,
            created_by: 1,
            title: "A".into(),
            description: None,
            max_score: 100.0,
            due_at: None,
            allow_late: false,
            created_at: now,
            updated_at: now,
        };
        assert!(!a.is_past_due(now));
        a.due_at = Some(now - chrono::Duration::hours(1));
        assert!(a.is_past_due(now));
    }
}
