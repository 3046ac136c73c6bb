//! 课时实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub module_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub content_type: String,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub sort_order: i32,
    pub is_preview: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_modules::Entity",
        from = "Column::ModuleId",
        to = "super::course_modules::Column::Id"
    )]
    Module,
}

impl Related<super::course_modules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_lesson(self) -> crate::models::courses::entities::Lesson {
        use crate::models::courses::entities::{Lesson, LessonContentType};

        Lesson {
            id: self.id,
            course_id: self.course_id,
            module_id: self.module_id,
            title: self.title,
            content: self.content,
            content_type: self.content_type.parse().unwrap_or(LessonContentType::Text),
            video_url: self.video_url,
            duration_minutes: self.duration_minutes,
            sort_order: self.sort_order,
            is_preview: self.is_preview,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
