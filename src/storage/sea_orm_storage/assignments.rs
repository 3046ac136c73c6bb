//! 作业与评分量规存储操作

use super::{SeaOrmStorage, db_err};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::rubrics::{
    ActiveModel as RubricActiveModel, Column as RubricColumn, Entity as Rubrics,
};
use crate::errors::Result;
use crate::models::assignments::{
    entities::{Assignment, Rubric},
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest, UpsertRubricRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_assignment_impl(
        &self,
        course_id: i64,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            module_id: Set(req.module_id),
            created_by: Set(created_by),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            max_score: Set(req.max_score),
            due_at: Set(req.due_at.map(|d| d.timestamp())),
            allow_late: Set(req.allow_late),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create assignment"))?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_impl(
        &self,
        course_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query assignment"))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query assignment"))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn list_assignments_impl(&self, course_id: i64) -> Result<Vec<Assignment>> {
        let result = Assignments::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::DueAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list assignments"))?;

        Ok(result.into_iter().map(|m| m.into_assignment()).collect())
    }

    pub async fn update_assignment_impl(
        &self,
        course_id: i64,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        if self
            .get_assignment_impl(course_id, assignment_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(due_at) = update.due_at {
            model.due_at = Set(Some(due_at.timestamp()));
        }
        if let Some(allow_late) = update.allow_late {
            model.allow_late = Set(allow_late);
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update assignment"))?;

        self.get_assignment_impl(course_id, assignment_id).await
    }

    pub async fn delete_assignment_impl(&self, course_id: i64, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_many()
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete assignment"))?;

        Ok(result.rows_affected > 0)
    }

    /// 每个作业至多一份量规，存在则覆盖
    pub async fn upsert_rubric_impl(
        &self,
        assignment_id: i64,
        req: UpsertRubricRequest,
    ) -> Result<Rubric> {
        let now = chrono::Utc::now().timestamp();
        let criteria = serde_json::to_string(&req.criteria)?;

        let existing = Rubrics::find()
            .filter(RubricColumn::AssignmentId.eq(assignment_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query rubric"))?;

        let result = match existing {
            Some(rubric) => RubricActiveModel {
                id: Set(rubric.id),
                title: Set(req.title.trim().to_string()),
                criteria: Set(criteria),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update rubric"))?,
            None => RubricActiveModel {
                assignment_id: Set(assignment_id),
                title: Set(req.title.trim().to_string()),
                criteria: Set(criteria),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create rubric"))?,
        };

        Ok(result.into_rubric())
    }

    pub async fn get_rubric_impl(&self, assignment_id: i64) -> Result<Option<Rubric>> {
        let result = Rubrics::find()
            .filter(RubricColumn::AssignmentId.eq(assignment_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query rubric"))?;

        Ok(result.map(|m| m.into_rubric()))
    }
}
