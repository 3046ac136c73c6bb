//! 辅导申请实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mentorship_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub mentor_profile_id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub response_note: Option<String>,
    pub created_at: i64,
    pub responded_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mentor_profiles::Entity",
        from = "Column::MentorProfileId",
        to = "super::mentor_profiles::Column::Id"
    )]
    MentorProfile,
}

impl Related<super::mentor_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MentorProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_request(self) -> crate::models::mentorship::entities::MentorshipRequest {
        use crate::models::mentorship::entities::{MentorshipRequest, MentorshipRequestStatus};

        MentorshipRequest {
            id: self.id,
            mentor_profile_id: self.mentor_profile_id,
            student_id: self.student_id,
            message: self.message,
            status: self.status.parse().unwrap_or(MentorshipRequestStatus::Pending),
            response_note: self.response_note,
            created_at: to_datetime(self.created_at),
            responded_at: self.responded_at.map(to_datetime),
        }
    }
}
