use serde::Serialize;

use super::entities::{ForumPost, ForumThread};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize)]
pub struct ThreadListResponse {
    pub items: Vec<ForumThread>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct ThreadDetailResponse {
    pub thread: ForumThread,
    pub posts: Vec<ForumPost>,
    pub pagination: PaginationInfo,
}
