use super::SeaOrmStorage;
use crate::entity::languages::{ActiveModel, Column, Entity as Languages};
use crate::errors::{LangLearnError, Result};
use crate::models::languages::{
    entities::Language,
    requests::{CreateLanguageRequest, UpdateLanguageRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_language_impl(&self, req: CreateLanguageRequest) -> Result<Language> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            native_name: Set(req.native_name),
            flag_emoji: Set(req.flag_emoji),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("创建语言失败: {e}")))?;

        Ok(result.into_language())
    }

    pub async fn get_language_by_id_impl(&self, id: i64) -> Result<Option<Language>> {
        let result = Languages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询语言失败: {e}")))?;

        Ok(result.map(|m| m.into_language()))
    }

    pub async fn get_language_by_code_impl(&self, code: &str) -> Result<Option<Language>> {
        let result = Languages::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询语言失败: {e}")))?;

        Ok(result.map(|m| m.into_language()))
    }

    /// 按名称排序列出语言
    pub async fn list_languages_impl(&self, include_inactive: bool) -> Result<Vec<Language>> {
        let mut select = Languages::find();
        if !include_inactive {
            select = select.filter(Column::IsActive.eq(true));
        }

        let result = select
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询语言列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_language()).collect())
    }

    pub async fn update_language_impl(
        &self,
        id: i64,
        update: UpdateLanguageRequest,
    ) -> Result<Option<Language>> {
        if self.get_language_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(native_name) = update.native_name {
            model.native_name = Set(Some(native_name));
        }
        if let Some(flag_emoji) = update.flag_emoji {
            model.flag_emoji = Set(Some(flag_emoji));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("更新语言失败: {e}")))?;

        Ok(Some(result.into_language()))
    }

    pub async fn delete_language_impl(&self, id: i64) -> Result<bool> {
        let result = Languages::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("删除语言失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
