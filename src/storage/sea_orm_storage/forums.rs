//! 讨论区存储操作

use super::{SeaOrmStorage, db_err};
use crate::entity::forum_posts::{
    ActiveModel as PostActiveModel, Column as PostColumn, Entity as ForumPosts,
};
use crate::entity::forum_threads::{ActiveModel, Column, Entity as ForumThreads};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    forums::{
        entities::{ForumPost, ForumThread},
        requests::{CreateThreadRequest, UpdateThreadRequest},
        responses::ThreadListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Condition, Expr, ExprTrait, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_thread_impl(
        &self,
        course_id: i64,
        author_id: i64,
        req: CreateThreadRequest,
    ) -> Result<ForumThread> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            author_id: Set(author_id),
            title: Set(req.title.trim().to_string()),
            body: Set(req.body),
            is_pinned: Set(false),
            is_locked: Set(false),
            reply_count: Set(0),
            last_activity_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create thread"))?;

        Ok(result.into_thread())
    }

    pub async fn get_thread_impl(
        &self,
        course_id: i64,
        thread_id: i64,
    ) -> Result<Option<ForumThread>> {
        let result = ForumThreads::find_by_id(thread_id)
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query thread"))?;

        Ok(result.map(|m| m.into_thread()))
    }

    /// 置顶在前，其余按最近活跃排序
    pub async fn list_threads_impl(
        &self,
        course_id: i64,
        pagination: PaginationQuery,
        search: Option<String>,
    ) -> Result<ThreadListResponse> {
        let (page, size) = pagination.normalized();

        let mut select = ForumThreads::find().filter(Column::CourseId.eq(course_id));

        if let Some(search) = search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", escape_like_pattern(search));
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(LikeExpr::new(&pattern).escape('\\')))
                    .add(Column::Body.like(LikeExpr::new(&pattern).escape('\\'))),
            );
        }

        select = select
            .order_by_desc(Column::IsPinned)
            .order_by_desc(Column::LastActivityAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count threads"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("Failed to count thread pages"))?;
        let threads = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("Failed to list threads"))?;

        Ok(ThreadListResponse {
            items: threads.into_iter().map(|m| m.into_thread()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_thread_impl(
        &self,
        thread_id: i64,
        update: UpdateThreadRequest,
    ) -> Result<Option<ForumThread>> {
        let Some(existing) = ForumThreads::find_by_id(thread_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query thread"))?
        else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(existing.id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(body) = update.body {
            model.body = Set(body);
        }
        if let Some(pinned) = update.is_pinned {
            model.is_pinned = Set(pinned);
        }
        if let Some(locked) = update.is_locked {
            model.is_locked = Set(locked);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update thread"))?;

        Ok(Some(updated.into_thread()))
    }

    pub async fn delete_thread_impl(&self, thread_id: i64) -> Result<bool> {
        let result = ForumThreads::delete_by_id(thread_id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete thread"))?;

        Ok(result.rows_affected > 0)
    }

    /// 发帖；锁定的主题只有 `allow_locked` 时才能回复
    pub async fn create_post_impl(
        &self,
        thread_id: i64,
        author_id: i64,
        body: String,
        allow_locked: bool,
    ) -> Result<ForumPost> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let thread = ForumThreads::find_by_id(thread_id)
            .one(&txn)
            .await
            .map_err(db_err("Failed to query thread"))?
            .ok_or_else(|| CourseHubError::not_found("Thread not found"))?;

        if thread.is_locked && !allow_locked {
            return Err(CourseHubError::validation("Thread is locked"));
        }

        let now = chrono::Utc::now().timestamp();
        let post = PostActiveModel {
            thread_id: Set(thread_id),
            author_id: Set(author_id),
            body: Set(body),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("Failed to create post"))?;

        // 计数在数据库中自增，并发发帖不会丢失
        ForumThreads::update_many()
            .col_expr(Column::ReplyCount, Expr::col(Column::ReplyCount).add(1))
            .col_expr(Column::LastActivityAt, Expr::value(now))
            .filter(Column::Id.eq(thread_id))
            .exec(&txn)
            .await
            .map_err(db_err("Failed to update thread activity"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit post"))?;

        Ok(post.into_post())
    }

    pub async fn get_post_impl(&self, thread_id: i64, post_id: i64) -> Result<Option<ForumPost>> {
        let result = ForumPosts::find_by_id(post_id)
            .filter(PostColumn::ThreadId.eq(thread_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query post"))?;

        Ok(result.map(|m| m.into_post()))
    }

    pub async fn list_posts_impl(
        &self,
        thread_id: i64,
        pagination: PaginationQuery,
    ) -> Result<(Vec<ForumPost>, PaginationInfo)> {
        let (page, size) = pagination.normalized();

        let paginator = ForumPosts::find()
            .filter(PostColumn::ThreadId.eq(thread_id))
            .order_by_asc(PostColumn::CreatedAt)
            .order_by_asc(PostColumn::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count posts"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("Failed to count post pages"))?;
        let posts = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("Failed to list posts"))?;

        Ok((
            posts.into_iter().map(|m| m.into_post()).collect(),
            PaginationInfo::new(page, size, total, pages),
        ))
    }

    pub async fn delete_post_impl(&self, thread_id: i64, post_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let result = ForumPosts::delete_many()
            .filter(PostColumn::Id.eq(post_id))
            .filter(PostColumn::ThreadId.eq(thread_id))
            .exec(&txn)
            .await
            .map_err(db_err("Failed to delete post"))?;

        if result.rows_affected == 0 {
            return Ok(false);
        }

        ForumThreads::update_many()
            .col_expr(Column::ReplyCount, Expr::col(Column::ReplyCount).sub(1))
            .filter(Column::Id.eq(thread_id))
            .filter(Column::ReplyCount.gt(0))
            .exec(&txn)
            .await
            .map_err(db_err("Failed to update thread reply count"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit post deletion"))?;

        Ok(true)
    }
}
