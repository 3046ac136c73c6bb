//! 辅导会话实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mentorship_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub request_id: i64,
    pub mentor_profile_id: i64,
    pub student_id: i64,
    pub starts_at: i64,
    pub duration_minutes: i32,
    pub topic: Option<String>,
    pub meeting_url: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mentorship_requests::Entity",
        from = "Column::RequestId",
        to = "super::mentorship_requests::Column::Id"
    )]
    Request,
}

impl Related<super::mentorship_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Request.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_session(self) -> crate::models::mentorship::entities::MentorshipSession {
        use crate::models::mentorship::entities::{MentorshipSession, SessionStatus};

        MentorshipSession {
            id: self.id,
            request_id: self.request_id,
            mentor_profile_id: self.mentor_profile_id,
            student_id: self.student_id,
            starts_at: to_datetime(self.starts_at),
            duration_minutes: self.duration_minutes,
            topic: self.topic,
            meeting_url: self.meeting_url,
            status: self.status.parse().unwrap_or(SessionStatus::Scheduled),
            notes: self.notes,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
