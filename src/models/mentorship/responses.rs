use serde::Serialize;

use super::entities::{MentorProfile, MentorshipRequest, MentorshipSession};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct MentorListResponse {
    pub items: Vec<MentorProfile>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct MentorshipRequestListResponse {
    pub items: Vec<MentorshipRequest>,
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub items: Vec<MentorshipSession>,
}
