//! 章节存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_err};
use crate::entity::course_modules::{ActiveModel, Column, Entity as CourseModules};
use crate::errors::{CourseHubError, Result};
use crate::models::courses::{
    entities::CourseModule,
    requests::{CreateModuleRequest, ReorderItem, UpdateModuleRequest},
    responses::ReorderResult,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

/// 查询某课程当前最大的章节序号
async fn max_module_order<C: ConnectionTrait>(conn: &C, course_id: i64) -> Result<i32> {
    let max: Option<Option<i32>> = CourseModules::find()
        .select_only()
        .column_as(Column::SortOrder.max(), "max_order")
        .filter(Column::CourseId.eq(course_id))
        .into_tuple()
        .one(conn)
        .await
        .map_err(db_err("Failed to query module order"))?;

    Ok(max.flatten().unwrap_or(0))
}

impl SeaOrmStorage {
    pub async fn list_modules_impl(&self, course_id: i64) -> Result<Vec<CourseModule>> {
        let modules = CourseModules::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list modules"))?;

        Ok(modules.into_iter().map(|m| m.into_module()).collect())
    }

    pub async fn get_module_impl(
        &self,
        course_id: i64,
        module_id: i64,
    ) -> Result<Option<CourseModule>> {
        let module = CourseModules::find_by_id(module_id)
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query module"))?;

        Ok(module.map(|m| m.into_module()))
    }

    /// 创建章节：序号取当前最大值加一，首个章节为 1
    pub async fn create_module_impl(
        &self,
        course_id: i64,
        req: CreateModuleRequest,
    ) -> Result<CourseModule> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let next_order = max_module_order(&txn, course_id).await? + 1;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            sort_order: Set(next_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(db_err("Failed to create module"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit module creation"))?;

        Ok(result.into_module())
    }

    pub async fn update_module_impl(
        &self,
        course_id: i64,
        module_id: i64,
        update: UpdateModuleRequest,
    ) -> Result<Option<CourseModule>> {
        if self.get_module_impl(course_id, module_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(module_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update module"))?;

        self.get_module_impl(course_id, module_id).await
    }

    pub async fn delete_module_impl(&self, course_id: i64, module_id: i64) -> Result<bool> {
        let result = CourseModules::delete_many()
            .filter(Column::Id.eq(module_id))
            .filter(Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete module"))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量调整章节顺序
    ///
    /// 所有条目必须属于该课程，否则整批回滚。`updated` 表示该行序号是否发生了变化。
    pub async fn reorder_modules_impl(
        &self,
        course_id: i64,
        items: &[ReorderItem],
    ) -> Result<Vec<ReorderResult>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let existing: HashMap<i64, i32> = CourseModules::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Id.is_in(ids))
            .all(&txn)
            .await
            .map_err(db_err("Failed to query modules"))?
            .into_iter()
            .map(|m| (m.id, m.sort_order))
            .collect();

        if let Some(missing) = items.iter().find(|i| !existing.contains_key(&i.id)) {
            // txn 在 drop 时回滚
            return Err(CourseHubError::validation(format!(
                "Module {} does not belong to course {course_id}",
                missing.id
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let changed = existing.get(&item.id) != Some(&item.order);
            if changed {
                let model = ActiveModel {
                    id: Set(item.id),
                    sort_order: Set(item.order),
                    updated_at: Set(now),
                    ..Default::default()
                };
                model
                    .update(&txn)
                    .await
                    .map_err(db_err("Failed to update module order"))?;
            }
            results.push(ReorderResult {
                id: item.id,
                order: item.order,
                updated: changed,
            });
        }

        txn.commit()
            .await
            .map_err(db_err("Failed to commit module reorder"))?;

        Ok(results)
    }
}
