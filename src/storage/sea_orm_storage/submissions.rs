//! 提交与评审存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_err};
use crate::entity::submission_reviews::{
    ActiveModel as ReviewActiveModel, Column as ReviewColumn, Entity as SubmissionReviews,
};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Submission, SubmissionExportRow, SubmissionReview, SubmissionStatus},
        requests::{
            CreateReviewRequest, CreateSubmissionRequest, SubmissionListQuery,
            SubmitFeedbackRequest,
        },
        responses::SubmissionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建提交；每个学员每个作业只有一份提交
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: CreateSubmissionRequest,
        is_late: bool,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            content: Set(req.content),
            attachment_url: Set(req.attachment_url),
            status: Set(SubmissionStatus::Submitted.to_string()),
            is_late: Set(is_late),
            score: Set(None),
            revision_count: Set(0),
            student_note: Set(None),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            let err = db_err("Failed to create submission")(e);
            if err.is_unique_violation() {
                CourseHubError::conflict("A submission for this assignment already exists")
            } else {
                err
            }
        })?;

        Ok(result.into_submission())
    }

    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query submission"))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find().filter(Column::AssignmentId.eq(query.assignment_id));

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::UpdatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count submissions"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("Failed to count submission pages"))?;
        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("Failed to list submissions"))?;

        Ok(SubmissionListResponse {
            items: submissions
                .into_iter()
                .map(|m| m.into_submission())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 导出某作业的全部提交，附带学员用户名
    pub async fn list_submission_export_rows_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionExportRow>> {
        let submissions = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list submissions"))?;

        let student_ids: Vec<i64> = submissions.iter().map(|s| s.student_id).collect();
        let usernames: HashMap<i64, String> = self
            .get_users_by_ids_impl(&student_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(submissions
            .into_iter()
            .map(|m| {
                let s = m.into_submission();
                SubmissionExportRow {
                    submission_id: s.id,
                    student_id: s.student_id,
                    username: usernames.get(&s.student_id).cloned().unwrap_or_default(),
                    status: s.status,
                    is_late: s.is_late,
                    score: s.score,
                    revision_count: s.revision_count,
                    submitted_at: s.submitted_at,
                }
            })
            .collect())
    }

    /// 写入评审并按结论更新提交状态
    ///
    /// 已评分的提交不再接受评审。
    pub async fn create_review_impl(
        &self,
        submission_id: i64,
        reviewer_id: i64,
        req: CreateReviewRequest,
        score: Option<f64>,
    ) -> Result<(SubmissionReview, Submission)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let submission = Submissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(db_err("Failed to query submission"))?
            .ok_or_else(|| CourseHubError::not_found("Submission not found"))?;

        if submission.status == SubmissionStatus::Graded.as_str() {
            return Err(CourseHubError::validation(
                "Submission has already been graded",
            ));
        }

        let now = chrono::Utc::now().timestamp();
        let criterion_scores = match &req.criterion_scores {
            Some(scores) if !scores.is_empty() => Some(serde_json::to_string(scores)?),
            _ => None,
        };

        let review = ReviewActiveModel {
            submission_id: Set(submission_id),
            reviewer_id: Set(reviewer_id),
            decision: Set(req.decision.to_string()),
            score: Set(score),
            criterion_scores: Set(criterion_scores),
            comment: Set(req.comment),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("Failed to create review"))?;

        let new_status = SubmissionStatus::from(req.decision);
        let mut model = ActiveModel {
            id: Set(submission_id),
            status: Set(new_status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };
        if score.is_some() {
            model.score = Set(score);
        }
        let updated = model
            .update(&txn)
            .await
            .map_err(db_err("Failed to update submission status"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit review"))?;

        Ok((review.into_review(), updated.into_submission()))
    }

    pub async fn list_reviews_impl(&self, submission_id: i64) -> Result<Vec<SubmissionReview>> {
        let reviews = SubmissionReviews::find()
            .filter(ReviewColumn::SubmissionId.eq(submission_id))
            .order_by_asc(ReviewColumn::CreatedAt)
            .order_by_asc(ReviewColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list reviews"))?;

        Ok(reviews.into_iter().map(|m| m.into_review()).collect())
    }

    /// 学员针对修改意见重新提交，仅在 revision_requested 状态下允许
    pub async fn resubmit_submission_impl(
        &self,
        submission_id: i64,
        feedback: SubmitFeedbackRequest,
    ) -> Result<Submission> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let submission = Submissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(db_err("Failed to query submission"))?
            .ok_or_else(|| CourseHubError::not_found("Submission not found"))?;

        if submission.status != SubmissionStatus::RevisionRequested.as_str() {
            return Err(CourseHubError::validation(format!(
                "Feedback can only be submitted when a revision is requested (current status: {})",
                submission.status
            )));
        }

        let mut model = ActiveModel {
            id: Set(submission_id),
            content: Set(feedback.content),
            student_note: Set(feedback.note),
            status: Set(SubmissionStatus::Resubmitted.to_string()),
            revision_count: Set(submission.revision_count + 1),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(url) = feedback.attachment_url {
            model.attachment_url = Set(Some(url));
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(db_err("Failed to resubmit"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit resubmission"))?;

        Ok(updated.into_submission())
    }
}
