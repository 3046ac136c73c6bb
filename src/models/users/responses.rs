use crate::models::enrollments::entities::EnrollmentDetail;
use super::entities::User;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 用户响应
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

// 用户列表响应
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}

// 管理员查看的用户详情，附带选课记录
#[derive(Debug, Serialize)]
pub struct UserDetailResponse {
    pub user: User,
    pub enrollments: Vec<EnrollmentDetail>,
}
