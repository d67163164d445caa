use super::SeaOrmStorage;
use crate::entity::study_sessions::{ActiveModel, Column, Entity as StudySessions};
use crate::errors::{LangLearnError, Result};
use crate::models::{
    PaginationInfo,
    study_sessions::{
        entities::StudySession, requests::StartStudySessionRequest,
        responses::StudySessionListResponse,
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn start_study_session_impl(
        &self,
        user_id: i64,
        req: StartStudySessionRequest,
    ) -> Result<StudySession> {
        let model = ActiveModel {
            user_id: Set(user_id),
            course_id: Set(req.course_id),
            language_id: Set(req.language_id),
            started_at: Set(Utc::now().timestamp()),
            ended_at: Set(None),
            duration_seconds: Set(None),
            notes: Set(req.notes),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("开始学习记录失败: {e}")))?;

        Ok(result.into_study_session())
    }

    pub async fn get_study_session_by_id_impl(&self, id: i64) -> Result<Option<StudySession>> {
        let result = StudySessions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询学习记录失败: {e}")))?;

        Ok(result.map(|m| m.into_study_session()))
    }

    /// 用户当前未结束的学习记录
    pub async fn get_open_study_session_impl(&self, user_id: i64) -> Result<Option<StudySession>> {
        let result = StudySessions::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::EndedAt.is_null())
            .order_by_desc(Column::StartedAt)
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询学习记录失败: {e}")))?;

        Ok(result.map(|m| m.into_study_session()))
    }

    /// 结束学习记录，时长按开始与结束时间计算
    pub async fn end_study_session_impl(
        &self,
        id: i64,
        ended_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> Result<Option<StudySession>> {
        let existing = StudySessions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询学习记录失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let ended = ended_at.timestamp();
        let duration = (ended - existing.started_at).max(0);

        let mut model: ActiveModel = existing.into();
        model.ended_at = Set(Some(ended));
        model.duration_seconds = Set(Some(duration));
        if let Some(notes) = notes {
            model.notes = Set(Some(notes));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("结束学习记录失败: {e}")))?;

        Ok(Some(result.into_study_session()))
    }

    pub async fn list_study_sessions_impl(
        &self,
        user_id: i64,
        page: u64,
        size: u64,
    ) -> Result<StudySessionListResponse> {
        let page = page.max(1);
        let size = size.clamp(1, 100);

        let paginator = StudySessions::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::StartedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询学习记录总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询学习记录页数失败: {e}")))?;
        let sessions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询学习记录失败: {e}")))?;

        Ok(StudySessionListResponse {
            items: sessions
                .into_iter()
                .map(|m| m.into_study_session())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn list_completed_study_sessions_since_impl(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<StudySession>> {
        let result = StudySessions::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::StartedAt.gte(since.timestamp()))
            .filter(Column::EndedAt.is_not_null())
            .order_by_asc(Column::StartedAt)
            .all(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询学习记录失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_study_session()).collect())
    }
}
