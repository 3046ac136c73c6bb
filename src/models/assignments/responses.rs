use serde::Serialize;

use super::entities::Assignment;

#[derive(Debug, Serialize)]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
}
