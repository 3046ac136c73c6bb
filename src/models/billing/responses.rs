use serde::Serialize;

use super::entities::Payment;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct PaymentListResponse {
    pub items: Vec<Payment>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub payment_id: i64,
    pub status: String,
    pub enrolled: bool,
}
