//! 课程存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_err};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::course_modules::{Column as ModuleColumn, Entity as CourseModules};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::lessons::{Column as LessonColumn, Entity as Lessons};
use crate::entity::quizzes::{Column as QuizColumn, Entity as Quizzes};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, CourseLevel, CourseOutline, CourseStatus, Lesson, ModuleOutline},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建课程，初始状态为草稿
    pub async fn create_course_impl(
        &self,
        instructor_id: i64,
        slug: String,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            instructor_id: Set(instructor_id),
            title: Set(req.title.trim().to_string()),
            slug: Set(slug),
            summary: Set(req.summary),
            description: Set(req.description),
            category: Set(req.category),
            level: Set(req.level.unwrap_or(CourseLevel::Beginner).to_string()),
            price_cents: Set(req.price_cents.unwrap_or(0)),
            currency: Set(req.currency.unwrap_or_else(|| "USD".to_string()).to_uppercase()),
            status: Set(CourseStatus::Draft.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create course"))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query course"))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn get_course_by_slug_impl(&self, slug: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query course"))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Courses::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = format!("%{}%", escape_like_pattern(search.trim()));
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(LikeExpr::new(&pattern).escape('\\')))
                    .add(Column::Summary.like(LikeExpr::new(&pattern).escape('\\'))),
            );
        }

        if let Some(ref category) = query.category
            && !category.trim().is_empty()
        {
            select = select.filter(Column::Category.eq(category.trim()));
        }

        if let Some(level) = query.level {
            select = select.filter(Column::Level.eq(level.to_string()));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
        }

        // 学员已选课程
        if let Some(user_id) = query.enrolled_user_id {
            let course_ids: Vec<i64> = Enrollments::find()
                .select_only()
                .column(EnrollmentColumn::CourseId)
                .filter(EnrollmentColumn::UserId.eq(user_id))
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(db_err("Failed to query enrollments"))?;
            select = select.filter(Column::Id.is_in(course_ids));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count courses"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("Failed to count course pages"))?;
        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("Failed to list courses"))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(summary) = update.summary {
            model.summary = Set(Some(summary));
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }
        if let Some(level) = update.level {
            model.level = Set(level.to_string());
        }
        if let Some(price_cents) = update.price_cents {
            model.price_cents = Set(price_cents);
        }
        if let Some(currency) = update.currency {
            model.currency = Set(currency.to_uppercase());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update course"))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程，章节、课时等由外键级联删除
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete course"))?;

        Ok(result.rows_affected > 0)
    }

    /// 组装课程大纲
    pub async fn get_course_outline_impl(&self, course_id: i64) -> Result<Option<CourseOutline>> {
        let Some(course) = self.get_course_by_id_impl(course_id).await? else {
            return Ok(None);
        };

        let modules = CourseModules::find()
            .filter(ModuleColumn::CourseId.eq(course_id))
            .order_by_asc(ModuleColumn::SortOrder)
            .order_by_asc(ModuleColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to query modules"))?;

        let lessons = Lessons::find()
            .filter(LessonColumn::CourseId.eq(course_id))
            .order_by_asc(LessonColumn::SortOrder)
            .order_by_asc(LessonColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to query lessons"))?;

        let mut lessons_by_module: HashMap<i64, Vec<Lesson>> = HashMap::new();
        for lesson in lessons {
            lessons_by_module
                .entry(lesson.module_id)
                .or_default()
                .push(lesson.into_lesson());
        }

        let modules = modules
            .into_iter()
            .map(|m| {
                let lessons = lessons_by_module.remove(&m.id).unwrap_or_default();
                ModuleOutline {
                    module: m.into_module(),
                    lessons,
                }
            })
            .collect();

        let quizzes = Quizzes::find()
            .filter(QuizColumn::CourseId.eq(course_id))
            .order_by_asc(QuizColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to query quizzes"))?
            .into_iter()
            .map(|m| m.into_quiz().summary())
            .collect();

        let assignments = Assignments::find()
            .filter(AssignmentColumn::CourseId.eq(course_id))
            .order_by_asc(AssignmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to query assignments"))?
            .into_iter()
            .map(|m| m.into_assignment())
            .collect();

        Ok(Some(CourseOutline {
            course,
            modules,
            quizzes,
            assignments,
        }))
    }
}
