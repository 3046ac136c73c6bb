use serde::Deserialize;

use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize)]
pub struct ThreadListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateThreadRequest {
    pub title: String,
    pub body: String,
}

// 作者可改标题正文，课程管理者可置顶、锁定
#[derive(Debug, Default, Deserialize)]
pub struct UpdateThreadRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub is_pinned: Option<bool>,
    pub is_locked: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub body: String,
}
