use serde::Deserialize;

use super::entities::EnrollmentStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize)]
pub struct RosterListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<EnrollmentStatus>,
}
