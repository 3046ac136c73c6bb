//! 测验实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub module_id: Option<i64>,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub passing_score: i32,
    pub max_attempts: Option<i32>,
    pub time_limit_minutes: Option<i32>,
    /// JSON 格式的题目列表
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_quiz(self) -> crate::models::quizzes::entities::Quiz {
        crate::models::quizzes::entities::Quiz {
            id: self.id,
            course_id: self.course_id,
            module_id: self.module_id,
            title: self.title,
            description: self.description,
            passing_score: self.passing_score,
            max_attempts: self.max_attempts,
            time_limit_minutes: self.time_limit_minutes,
            questions: serde_json::from_str(&self.questions).unwrap_or_default(),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
