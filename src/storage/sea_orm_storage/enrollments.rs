//! 选课存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_err};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    enrollments::{
        entities::{Enrollment, EnrollmentDetail, EnrollmentStatus, RosterEntry},
        responses::RosterListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

/// 插入选课记录，重复选课返回冲突
pub(super) async fn insert_enrollment<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    course_id: i64,
) -> Result<Model> {
    ActiveModel {
        user_id: Set(user_id),
        course_id: Set(course_id),
        status: Set(EnrollmentStatus::Active.to_string()),
        enrolled_at: Set(chrono::Utc::now().timestamp()),
        completed_at: Set(None),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| {
        let err = db_err("Failed to create enrollment")(e);
        if err.is_unique_violation() {
            CourseHubError::conflict("User is already enrolled in this course")
        } else {
            err
        }
    })
}

impl SeaOrmStorage {
    pub async fn enroll_user_impl(&self, user_id: i64, course_id: i64) -> Result<Enrollment> {
        Ok(insert_enrollment(&self.db, user_id, course_id)
            .await?
            .into_enrollment())
    }

    pub async fn get_enrollment_impl(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query enrollment"))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn delete_enrollment_impl(&self, user_id: i64, course_id: i64) -> Result<bool> {
        let result = Enrollments::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete enrollment"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_course_enrollments_impl(&self, course_id: i64) -> Result<u64> {
        Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(db_err("Failed to count enrollments"))
    }

    /// 学员的选课列表，附带课程标题
    pub async fn list_user_enrollments_impl(&self, user_id: i64) -> Result<Vec<EnrollmentDetail>> {
        let enrollments = Enrollments::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list enrollments"))?;

        let course_ids: Vec<i64> = enrollments.iter().map(|e| e.course_id).collect();
        let courses: HashMap<i64, (String, String)> = if course_ids.is_empty() {
            HashMap::new()
        } else {
            Courses::find()
                .filter(CourseColumn::Id.is_in(course_ids))
                .all(&self.db)
                .await
                .map_err(db_err("Failed to query courses"))?
                .into_iter()
                .map(|c| (c.id, (c.title, c.slug)))
                .collect()
        };

        Ok(enrollments
            .into_iter()
            .map(|m| {
                let (course_title, course_slug) =
                    courses.get(&m.course_id).cloned().unwrap_or_default();
                EnrollmentDetail {
                    enrollment: m.into_enrollment(),
                    course_title,
                    course_slug,
                }
            })
            .collect())
    }

    pub async fn list_course_roster_impl(
        &self,
        course_id: i64,
        pagination: PaginationQuery,
        status: Option<EnrollmentStatus>,
    ) -> Result<RosterListResponse> {
        let (page, size) = pagination.normalized();

        let mut select = Enrollments::find().filter(Column::CourseId.eq(course_id));
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        select = select.order_by_asc(Column::EnrolledAt).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count roster"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("Failed to count roster pages"))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("Failed to list roster"))?;

        Ok(RosterListResponse {
            items: self.attach_users(rows).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn list_course_roster_all_impl(&self, course_id: i64) -> Result<Vec<RosterEntry>> {
        let rows = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::EnrolledAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list roster"))?;

        self.attach_users(rows).await
    }

    async fn attach_users(&self, rows: Vec<Model>) -> Result<Vec<RosterEntry>> {
        let user_ids: Vec<i64> = rows.iter().map(|r| r.user_id).collect();
        let users: HashMap<i64, _> = self
            .get_users_by_ids_impl(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(rows
            .into_iter()
            .map(|m| {
                let user = users.get(&m.user_id);
                RosterEntry {
                    username: user.map(|u| u.username.clone()).unwrap_or_default(),
                    email: user.map(|u| u.email.clone()).unwrap_or_default(),
                    display_name: user
                        .map(|u| u.profile.display_name.clone())
                        .unwrap_or_default(),
                    enrollment: m.into_enrollment(),
                }
            })
            .collect())
    }
}
