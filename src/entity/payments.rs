//! 支付实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub provider_ref: Option<String>,
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
    pub fn into_payment(self) -> crate::models::billing::entities::Payment {
        use crate::models::billing::entities::{Payment, PaymentStatus};

        Payment {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            amount_cents: self.amount_cents,
            currency: self.currency,
            status: self.status.parse().unwrap_or(PaymentStatus::Pending),
            provider_ref: self.provider_ref,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
