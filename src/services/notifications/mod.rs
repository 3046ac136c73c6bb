pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::notifications::requests::NotificationListParams;

storage_service!(NotificationService);

impl NotificationService {
    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        params: NotificationListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, request, params).await
    }

    pub async fn get_unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::get_unread_count(self, request).await
    }

    pub async fn mark_as_read(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::mark_as_read(self, request, notification_id).await
    }

    pub async fn mark_all_as_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::mark_all_as_read(self, request).await
    }

    pub async fn delete_notification(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_notification(self, request, notification_id).await
    }
}
