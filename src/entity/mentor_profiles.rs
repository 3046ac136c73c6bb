//! 导师资料实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mentor_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub headline: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    /// JSON 格式的专长标签
    #[sea_orm(column_type = "Text")]
    pub expertise: String,
    pub hourly_rate_cents: Option<i64>,
    pub max_mentees: i32,
    pub is_accepting: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_profile(self) -> crate::models::mentorship::entities::MentorProfile {
        crate::models::mentorship::entities::MentorProfile {
            id: self.id,
            user_id: self.user_id,
            headline: self.headline,
            bio: self.bio,
            expertise: serde_json::from_str(&self.expertise).unwrap_or_default(),
            hourly_rate_cents: self.hourly_rate_cents,
            max_mentees: self.max_mentees,
            is_accepting: self.is_accepting,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
