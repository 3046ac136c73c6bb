//! 导师辅导存储操作

use super::{SeaOrmStorage, db_err};
use crate::entity::mentor_profiles::{
    ActiveModel as ProfileActiveModel, Column as ProfileColumn, Entity as MentorProfiles,
};
use crate::entity::mentorship_requests::{
    ActiveModel as RequestActiveModel, Column as RequestColumn, Entity as MentorshipRequests,
};
use crate::entity::mentorship_sessions::{
    ActiveModel as SessionActiveModel, Column as SessionColumn, Entity as MentorshipSessions,
};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    mentorship::{
        entities::{
            MentorProfile, MentorshipRequest, MentorshipRequestStatus, MentorshipSession,
            SessionStatus,
        },
        requests::{CreateSessionRequest, UpdateSessionRequest, UpsertMentorProfileRequest},
        responses::MentorListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Condition, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 导师当前已接受的学员数
async fn count_accepted<C: ConnectionTrait>(conn: &C, mentor_profile_id: i64) -> Result<u64> {
    MentorshipRequests::find()
        .filter(RequestColumn::MentorProfileId.eq(mentor_profile_id))
        .filter(RequestColumn::Status.eq(MentorshipRequestStatus::Accepted.as_str()))
        .count(conn)
        .await
        .map_err(db_err("Failed to count accepted mentees"))
}

impl SeaOrmStorage {
    /// 每个用户至多一份导师资料，存在则覆盖
    pub async fn upsert_mentor_profile_impl(
        &self,
        user_id: i64,
        req: UpsertMentorProfileRequest,
    ) -> Result<MentorProfile> {
        let now = chrono::Utc::now().timestamp();
        let expertise: Vec<String> = req
            .expertise
            .iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        let expertise = serde_json::to_string(&expertise)?;

        let existing = MentorProfiles::find()
            .filter(ProfileColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query mentor profile"))?;

        let result = match existing {
            Some(profile) => ProfileActiveModel {
                id: Set(profile.id),
                headline: Set(req.headline.trim().to_string()),
                bio: Set(req.bio),
                expertise: Set(expertise),
                hourly_rate_cents: Set(req.hourly_rate_cents),
                max_mentees: Set(req.max_mentees),
                is_accepting: Set(req.is_accepting),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update mentor profile"))?,
            None => ProfileActiveModel {
                user_id: Set(user_id),
                headline: Set(req.headline.trim().to_string()),
                bio: Set(req.bio),
                expertise: Set(expertise),
                hourly_rate_cents: Set(req.hourly_rate_cents),
                max_mentees: Set(req.max_mentees),
                is_accepting: Set(req.is_accepting),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create mentor profile"))?,
        };

        Ok(result.into_profile())
    }

    pub async fn get_mentor_profile_impl(&self, profile_id: i64) -> Result<Option<MentorProfile>> {
        let result = MentorProfiles::find_by_id(profile_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query mentor profile"))?;

        Ok(result.map(|m| m.into_profile()))
    }

    pub async fn get_mentor_profile_by_user_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<MentorProfile>> {
        let result = MentorProfiles::find()
            .filter(ProfileColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query mentor profile"))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 只列出正在接收学员的导师
    pub async fn list_mentor_profiles_impl(
        &self,
        pagination: PaginationQuery,
        search: Option<String>,
    ) -> Result<MentorListResponse> {
        let (page, size) = pagination.normalized();

        let mut select = MentorProfiles::find().filter(ProfileColumn::IsAccepting.eq(true));

        if let Some(search) = search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", escape_like_pattern(search));
            select = select.filter(
                Condition::any()
                    .add(ProfileColumn::Expertise.like(LikeExpr::new(&pattern).escape('\\')))
                    .add(ProfileColumn::Headline.like(LikeExpr::new(&pattern).escape('\\'))),
            );
        }

        let paginator = select
            .order_by_desc(ProfileColumn::UpdatedAt)
            .order_by_asc(ProfileColumn::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count mentor profiles"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("Failed to count mentor profile pages"))?;
        let profiles = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("Failed to list mentor profiles"))?;

        Ok(MentorListResponse {
            items: profiles.into_iter().map(|m| m.into_profile()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 创建申请；同一学员对同一导师只能有一份待处理或已接受的申请
    pub async fn create_mentorship_request_impl(
        &self,
        profile: &MentorProfile,
        student_id: i64,
        message: Option<String>,
    ) -> Result<MentorshipRequest> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let duplicate = MentorshipRequests::find()
            .filter(RequestColumn::MentorProfileId.eq(profile.id))
            .filter(RequestColumn::StudentId.eq(student_id))
            .filter(RequestColumn::Status.is_in([
                MentorshipRequestStatus::Pending.as_str(),
                MentorshipRequestStatus::Accepted.as_str(),
            ]))
            .one(&txn)
            .await
            .map_err(db_err("Failed to query mentorship requests"))?;
        if duplicate.is_some() {
            return Err(CourseHubError::conflict(
                "An open mentorship request with this mentor already exists",
            ));
        }

        if !profile.is_accepting {
            return Err(CourseHubError::validation(
                "Mentor is not accepting new mentees",
            ));
        }
        let accepted = count_accepted(&txn, profile.id).await?;
        if accepted >= profile.max_mentees.max(0) as u64 {
            return Err(CourseHubError::validation(
                "Mentor has no remaining mentee capacity",
            ));
        }

        let result = RequestActiveModel {
            mentor_profile_id: Set(profile.id),
            student_id: Set(student_id),
            message: Set(message),
            status: Set(MentorshipRequestStatus::Pending.to_string()),
            response_note: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            responded_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("Failed to create mentorship request"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit mentorship request"))?;

        Ok(result.into_request())
    }

    pub async fn get_mentorship_request_impl(
        &self,
        request_id: i64,
    ) -> Result<Option<MentorshipRequest>> {
        let result = MentorshipRequests::find_by_id(request_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query mentorship request"))?;

        Ok(result.map(|m| m.into_request()))
    }

    pub async fn list_mentorship_requests_impl(
        &self,
        mentor_profile_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<MentorshipRequest>> {
        let mut select = MentorshipRequests::find();
        if let Some(profile_id) = mentor_profile_id {
            select = select.filter(RequestColumn::MentorProfileId.eq(profile_id));
        }
        if let Some(student_id) = student_id {
            select = select.filter(RequestColumn::StudentId.eq(student_id));
        }

        let result = select
            .order_by_desc(RequestColumn::CreatedAt)
            .order_by_desc(RequestColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list mentorship requests"))?;

        Ok(result.into_iter().map(|m| m.into_request()).collect())
    }

    /// 处理申请；只有待处理的申请可以被接受或拒绝
    pub async fn respond_mentorship_request_impl(
        &self,
        request_id: i64,
        status: MentorshipRequestStatus,
        response_note: Option<String>,
    ) -> Result<MentorshipRequest> {
        if status == MentorshipRequestStatus::Pending {
            return Err(CourseHubError::validation(
                "A request can only be accepted or rejected",
            ));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let request = MentorshipRequests::find_by_id(request_id)
            .one(&txn)
            .await
            .map_err(db_err("Failed to query mentorship request"))?
            .ok_or_else(|| CourseHubError::not_found("Mentorship request not found"))?;

        if request.status != MentorshipRequestStatus::Pending.as_str() {
            return Err(CourseHubError::validation(format!(
                "Request has already been {}",
                request.status
            )));
        }

        if status == MentorshipRequestStatus::Accepted {
            let profile = MentorProfiles::find_by_id(request.mentor_profile_id)
                .one(&txn)
                .await
                .map_err(db_err("Failed to query mentor profile"))?
                .ok_or_else(|| CourseHubError::not_found("Mentor profile not found"))?;
            let accepted = count_accepted(&txn, profile.id).await?;
            if accepted >= profile.max_mentees.max(0) as u64 {
                return Err(CourseHubError::validation(
                    "Mentor has no remaining mentee capacity",
                ));
            }
        }

        let updated = RequestActiveModel {
            id: Set(request_id),
            status: Set(status.to_string()),
            response_note: Set(response_note),
            responded_at: Set(Some(chrono::Utc::now().timestamp())),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(db_err("Failed to update mentorship request"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit mentorship response"))?;

        Ok(updated.into_request())
    }

    pub async fn has_accepted_mentorship_impl(
        &self,
        mentor_user_id: i64,
        student_id: i64,
    ) -> Result<bool> {
        let Some(profile) = self.get_mentor_profile_by_user_impl(mentor_user_id).await? else {
            return Ok(false);
        };

        let count = MentorshipRequests::find()
            .filter(RequestColumn::MentorProfileId.eq(profile.id))
            .filter(RequestColumn::StudentId.eq(student_id))
            .filter(RequestColumn::Status.eq(MentorshipRequestStatus::Accepted.as_str()))
            .count(&self.db)
            .await
            .map_err(db_err("Failed to query mentorship"))?;

        Ok(count > 0)
    }

    /// 排期；与导师已排期的会话重叠则拒绝
    pub async fn create_session_impl(
        &self,
        request: &MentorshipRequest,
        session: CreateSessionRequest,
    ) -> Result<MentorshipSession> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let scheduled = MentorshipSessions::find()
            .filter(SessionColumn::MentorProfileId.eq(request.mentor_profile_id))
            .filter(SessionColumn::Status.eq(SessionStatus::Scheduled.as_str()))
            .all(&txn)
            .await
            .map_err(db_err("Failed to query sessions"))?;

        if let Some(clash) = scheduled
            .into_iter()
            .map(|m| m.into_session())
            .find(|s| s.overlaps(session.starts_at, session.duration_minutes))
        {
            return Err(CourseHubError::conflict(format!(
                "Session overlaps with an existing session starting at {}",
                clash.starts_at.to_rfc3339()
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let result = SessionActiveModel {
            request_id: Set(request.id),
            mentor_profile_id: Set(request.mentor_profile_id),
            student_id: Set(request.student_id),
            starts_at: Set(session.starts_at.timestamp()),
            duration_minutes: Set(session.duration_minutes),
            topic: Set(session.topic),
            meeting_url: Set(session.meeting_url),
            status: Set(SessionStatus::Scheduled.to_string()),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("Failed to create session"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit session"))?;

        Ok(result.into_session())
    }

    pub async fn get_session_impl(&self, session_id: i64) -> Result<Option<MentorshipSession>> {
        let result = MentorshipSessions::find_by_id(session_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query session"))?;

        Ok(result.map(|m| m.into_session()))
    }

    pub async fn list_sessions_impl(
        &self,
        mentor_profile_id: Option<i64>,
        student_id: Option<i64>,
    ) -> Result<Vec<MentorshipSession>> {
        let mut select = MentorshipSessions::find();
        if let Some(profile_id) = mentor_profile_id {
            select = select.filter(SessionColumn::MentorProfileId.eq(profile_id));
        }
        if let Some(student_id) = student_id {
            select = select.filter(SessionColumn::StudentId.eq(student_id));
        }

        let result = select
            .order_by_asc(SessionColumn::StartsAt)
            .order_by_asc(SessionColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list sessions"))?;

        Ok(result.into_iter().map(|m| m.into_session()).collect())
    }

    /// 更新会话；状态只能从 scheduled 变为 completed 或 cancelled
    pub async fn update_session_impl(
        &self,
        session_id: i64,
        update: UpdateSessionRequest,
    ) -> Result<MentorshipSession> {
        let existing = MentorshipSessions::find_by_id(session_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query session"))?
            .ok_or_else(|| CourseHubError::not_found("Session not found"))?;

        let mut model = SessionActiveModel {
            id: Set(session_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(status) = update.status {
            if existing.status != SessionStatus::Scheduled.as_str()
                || status == SessionStatus::Scheduled
            {
                return Err(CourseHubError::validation(format!(
                    "Cannot change session status from {} to {}",
                    existing.status, status
                )));
            }
            model.status = Set(status.to_string());
        }
        if let Some(notes) = update.notes {
            model.notes = Set(Some(notes));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update session"))?;

        Ok(updated.into_session())
    }
}
