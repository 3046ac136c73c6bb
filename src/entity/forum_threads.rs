//! 论坛主题实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "forum_threads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub author_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub reply_count: i32,
    pub last_activity_at: i64,
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
    pub fn into_thread(self) -> crate::models::forums::entities::ForumThread {
        crate::models::forums::entities::ForumThread {
            id: self.id,
            course_id: self.course_id,
            author_id: self.author_id,
            title: self.title,
            body: self.body,
            is_pinned: self.is_pinned,
            is_locked: self.is_locked,
            reply_count: self.reply_count,
            last_activity_at: to_datetime(self.last_activity_at),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
