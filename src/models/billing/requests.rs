use serde::Deserialize;

use super::entities::PaymentStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub course_id: i64,
}

// 支付回调事件，仅接受 completed / failed
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub payment_id: i64,
    pub status: PaymentStatus,
    pub provider_ref: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<PaymentStatus>,
}

// 支付列表查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct PaymentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub user_id: Option<i64>,
    pub status: Option<PaymentStatus>,
}
