//! 支付存储操作

use super::enrollments::insert_enrollment;
use super::notifications::insert_notification;
use super::{SeaOrmStorage, db_err};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::payments::{ActiveModel, Column, Entity as Payments};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    PaginationInfo,
    billing::{
        entities::{Payment, PaymentStatus},
        requests::PaymentListQuery,
        responses::PaymentListResponse,
    },
    courses::entities::Course,
    notifications::entities::{NewNotification, NotificationType},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 同一学员同一课程只保留一笔待支付订单；课程价格或币种变化后旧订单作废
    pub async fn create_or_reuse_payment_impl(
        &self,
        user_id: i64,
        course: &Course,
    ) -> Result<Payment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let pending = Payments::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course.id))
            .filter(Column::Status.eq(PaymentStatus::Pending.as_str()))
            .order_by_desc(Column::Id)
            .one(&txn)
            .await
            .map_err(db_err("Failed to query payments"))?;

        let now = chrono::Utc::now().timestamp();
        if let Some(payment) = pending {
            if payment.amount_cents == course.price_cents && payment.currency == course.currency {
                return Ok(payment.into_payment());
            }

            Payments::update_many()
                .col_expr(Column::Status, Expr::value(PaymentStatus::Failed.to_string()))
                .col_expr(Column::UpdatedAt, Expr::value(now))
                .filter(Column::UserId.eq(user_id))
                .filter(Column::CourseId.eq(course.id))
                .filter(Column::Status.eq(PaymentStatus::Pending.as_str()))
                .exec(&txn)
                .await
                .map_err(db_err("Failed to expire stale payments"))?;
            debug!(
                "Expired stale pending payment {} for course {} after price change",
                payment.id, course.id
            );
        }

        let result = ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course.id),
            amount_cents: Set(course.price_cents),
            currency: Set(course.currency.clone()),
            status: Set(PaymentStatus::Pending.to_string()),
            provider_ref: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("Failed to create payment"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit payment"))?;

        Ok(result.into_payment())
    }

    pub async fn get_payment_impl(&self, payment_id: i64) -> Result<Option<Payment>> {
        let result = Payments::find_by_id(payment_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query payment"))?;

        Ok(result.map(|m| m.into_payment()))
    }

    pub async fn has_completed_payment_impl(&self, user_id: i64, course_id: i64) -> Result<bool> {
        let count = Payments::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Status.eq(PaymentStatus::Completed.as_str()))
            .count(&self.db)
            .await
            .map_err(db_err("Failed to query payments"))?;

        Ok(count > 0)
    }

    pub async fn list_payments_with_pagination_impl(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Payments::find();
        if let Some(user_id) = query.user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count payments"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("Failed to count payment pages"))?;
        let payments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("Failed to list payments"))?;

        Ok(PaymentListResponse {
            items: payments.into_iter().map(|m| m.into_payment()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn list_all_payments_impl(&self) -> Result<Vec<Payment>> {
        let result = Payments::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list payments"))?;

        Ok(result.into_iter().map(|m| m.into_payment()).collect())
    }

    /// 处理支付回调
    ///
    /// 只有待支付订单接受回调；支付完成时在同一事务内选课并发送通知。
    /// 返回值第二项表示本次是否新建了选课记录。
    pub async fn apply_payment_event_impl(
        &self,
        payment_id: i64,
        status: PaymentStatus,
        provider_ref: Option<String>,
    ) -> Result<(Payment, bool)> {
        if !matches!(status, PaymentStatus::Completed | PaymentStatus::Failed) {
            return Err(CourseHubError::validation(format!(
                "Unsupported payment event status: {status}"
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let payment = Payments::find_by_id(payment_id)
            .one(&txn)
            .await
            .map_err(db_err("Failed to query payment"))?
            .ok_or_else(|| CourseHubError::not_found("Payment not found"))?;

        if payment.status != PaymentStatus::Pending.as_str() {
            return Err(CourseHubError::validation(format!(
                "Payment is already {}",
                payment.status
            )));
        }

        let mut model = ActiveModel {
            id: Set(payment_id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if provider_ref.is_some() {
            model.provider_ref = Set(provider_ref);
        }
        let updated = model
            .update(&txn)
            .await
            .map_err(db_err("Failed to update payment"))?;

        let mut enrolled = false;
        if status == PaymentStatus::Completed {
            let existing = Enrollments::find()
                .filter(EnrollmentColumn::UserId.eq(updated.user_id))
                .filter(EnrollmentColumn::CourseId.eq(updated.course_id))
                .one(&txn)
                .await
                .map_err(db_err("Failed to query enrollment"))?;

            if existing.is_none() {
                insert_enrollment(&txn, updated.user_id, updated.course_id).await?;
                enrolled = true;
            }

            insert_notification(
                &txn,
                NewNotification::new(
                    updated.user_id,
                    NotificationType::Payment,
                    "Payment completed",
                )
                .content(format!(
                    "Your payment of {} {} has been received",
                    format_amount(updated.amount_cents),
                    updated.currency
                ))
                .reference("course", updated.course_id),
            )
            .await?;
        }

        txn.commit()
            .await
            .map_err(db_err("Failed to commit payment event"))?;

        Ok((updated.into_payment(), enrolled))
    }

    /// 退款；仅已完成的订单可以退款，选课记录保持不变
    pub async fn refund_payment_impl(&self, payment_id: i64) -> Result<Payment> {
        let payment = Payments::find_by_id(payment_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query payment"))?
            .ok_or_else(|| CourseHubError::not_found("Payment not found"))?;

        if payment.status != PaymentStatus::Completed.as_str() {
            return Err(CourseHubError::validation(format!(
                "Only completed payments can be refunded (current status: {})",
                payment.status
            )));
        }

        let updated = ActiveModel {
            id: Set(payment_id),
            status: Set(PaymentStatus::Refunded.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_err("Failed to refund payment"))?;

        Ok(updated.into_payment())
    }
}

fn format_amount(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}

#[cfg(test)]
mod tests {
    use super::format_amount;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(4999), "49.99");
        assert_eq!(format_amount(500), "5.00");
        assert_eq!(format_amount(7), "0.07");
    }
}
