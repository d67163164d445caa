use super::SeaOrmStorage;
use crate::entity::achievements::{ActiveModel, Column, Entity as Achievements};
use crate::entity::user_achievements::{
    ActiveModel as UserAchievementActiveModel, Column as UserAchievementColumn,
    Entity as UserAchievements,
};
use crate::errors::{LangLearnError, Result};
use crate::models::achievements::{
    entities::{Achievement, UserAchievement},
    requests::{CreateAchievementRequest, UpdateAchievementRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_achievement_impl(
        &self,
        req: CreateAchievementRequest,
    ) -> Result<Achievement> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            icon_url: Set(req.icon_url),
            category: Set(req.category),
            points: Set(req.points.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("创建成就失败: {e}")))?;

        Ok(result.into_achievement())
    }

    pub async fn get_achievement_by_id_impl(&self, id: i64) -> Result<Option<Achievement>> {
        let result = Achievements::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询成就失败: {e}")))?;

        Ok(result.map(|m| m.into_achievement()))
    }

    pub async fn list_achievements_impl(&self) -> Result<Vec<Achievement>> {
        let result = Achievements::find()
            .order_by_asc(Column::Category)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询成就列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_achievement()).collect())
    }

    pub async fn update_achievement_impl(
        &self,
        id: i64,
        update: UpdateAchievementRequest,
    ) -> Result<Option<Achievement>> {
        if self.get_achievement_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(icon_url) = update.icon_url {
            model.icon_url = Set(Some(icon_url));
        }
        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }
        if let Some(points) = update.points {
            model.points = Set(points);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("更新成就失败: {e}")))?;

        Ok(Some(result.into_achievement()))
    }

    pub async fn delete_achievement_impl(&self, id: i64) -> Result<bool> {
        let result = Achievements::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("删除成就失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 颁发成就，调用方保证成就存在
    pub async fn award_achievement_impl(
        &self,
        user_id: i64,
        achievement_id: i64,
        awarded_by: Option<i64>,
    ) -> Result<UserAchievement> {
        let achievement = self
            .get_achievement_by_id_impl(achievement_id)
            .await?
            .ok_or_else(|| LangLearnError::not_found(format!("成就不存在: {achievement_id}")))?;

        let model = UserAchievementActiveModel {
            user_id: Set(user_id),
            achievement_id: Set(achievement_id),
            awarded_by: Set(awarded_by),
            awarded_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("颁发成就失败: {e}")))?;

        Ok(result.into_user_achievement(achievement))
    }

    pub async fn has_user_achievement_impl(
        &self,
        user_id: i64,
        achievement_id: i64,
    ) -> Result<bool> {
        let count = UserAchievements::find()
            .filter(UserAchievementColumn::UserId.eq(user_id))
            .filter(UserAchievementColumn::AchievementId.eq(achievement_id))
            .count(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询用户成就失败: {e}")))?;

        Ok(count > 0)
    }

    /// 用户已获得的成就，最近获得的在前
    pub async fn list_user_achievements_impl(&self, user_id: i64) -> Result<Vec<UserAchievement>> {
        let rows = UserAchievements::find()
            .filter(UserAchievementColumn::UserId.eq(user_id))
            .order_by_desc(UserAchievementColumn::AwardedAt)
            .find_also_related(Achievements)
            .all(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询用户成就失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(awarded, achievement)| {
                achievement.map(|a| awarded.into_user_achievement(a.into_achievement()))
            })
            .collect())
    }
}
