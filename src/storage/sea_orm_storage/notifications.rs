//! 通知存储操作

use super::{SeaOrmStorage, db_err};
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications, Model};
use crate::errors::Result;
use crate::models::{
    PaginationInfo, PaginationQuery,
    notifications::{
        entities::{NewNotification, Notification},
        responses::NotificationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
    sea_query::Expr,
};

/// 写入一条通知，可在事务内调用
pub(super) async fn insert_notification<C: ConnectionTrait>(
    conn: &C,
    notification: NewNotification,
) -> Result<Model> {
    ActiveModel {
        user_id: Set(notification.user_id),
        notification_type: Set(notification.notification_type.to_string()),
        title: Set(notification.title),
        content: Set(notification.content),
        reference_type: Set(notification.reference_type),
        reference_id: Set(notification.reference_id),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(db_err("Failed to create notification"))
}

impl SeaOrmStorage {
    pub async fn create_notification_impl(
        &self,
        notification: NewNotification,
    ) -> Result<Notification> {
        Ok(insert_notification(&self.db, notification)
            .await?
            .into_notification())
    }

    pub async fn list_notifications_impl(
        &self,
        user_id: i64,
        pagination: PaginationQuery,
        unread_only: bool,
    ) -> Result<NotificationListResponse> {
        let (page, size) = pagination.normalized();

        let mut select = Notifications::find().filter(Column::UserId.eq(user_id));
        if unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count notifications"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("Failed to count notification pages"))?;
        let notifications = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("Failed to list notifications"))?;

        Ok(NotificationListResponse {
            items: notifications
                .into_iter()
                .map(|m| m.into_notification())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn count_unread_notifications_impl(&self, user_id: i64) -> Result<i64> {
        let count = Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(db_err("Failed to count unread notifications"))?;

        Ok(count as i64)
    }

    /// 只能标记自己的通知
    pub async fn mark_notification_read_impl(
        &self,
        user_id: i64,
        notification_id: i64,
    ) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(Column::Id.eq(notification_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to mark notification as read"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn mark_all_notifications_read_impl(&self, user_id: i64) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to mark notifications as read"))?;

        Ok(result.rows_affected as i64)
    }

    pub async fn delete_notification_impl(
        &self,
        user_id: i64,
        notification_id: i64,
    ) -> Result<bool> {
        let result = Notifications::delete_many()
            .filter(Column::Id.eq(notification_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete notification"))?;

        Ok(result.rows_affected > 0)
    }
}
