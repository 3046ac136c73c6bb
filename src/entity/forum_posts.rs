//! 论坛回复实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "forum_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub thread_id: i64,
    pub author_id: i64,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::forum_threads::Entity",
        from = "Column::ThreadId",
        to = "super::forum_threads::Column::Id"
    )]
    Thread,
}

impl Related<super::forum_threads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Thread.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_post(self) -> crate::models::forums::entities::ForumPost {
        crate::models::forums::entities::ForumPost {
            id: self.id,
            thread_id: self.thread_id,
            author_id: self.author_id,
            body: self.body,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
