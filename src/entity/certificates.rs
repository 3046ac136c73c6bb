//! 证书实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "certificates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub enrollment_id: i64,
    pub credential_id: String,
    pub verification_url: Option<String>,
    #[sea_orm(unique)]
    pub verification_code: String,
    pub issued_at: i64,
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
    pub fn into_certificate(self) -> crate::models::certificates::entities::Certificate {
        crate::models::certificates::entities::Certificate {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            enrollment_id: self.enrollment_id,
            credential_id: self.credential_id,
            verification_url: self.verification_url,
            verification_code: self.verification_code,
            issued_at: to_datetime(self.issued_at),
        }
    }
}
