use serde::Serialize;

use super::entities::{EnrollmentDetail, RosterEntry};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct EnrollmentListResponse {
    pub items: Vec<EnrollmentDetail>,
}

#[derive(Debug, Serialize)]
pub struct RosterListResponse {
    pub items: Vec<RosterEntry>,
    pub pagination: PaginationInfo,
}
