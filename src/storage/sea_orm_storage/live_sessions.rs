use super::SeaOrmStorage;
use crate::entity::live_session_attendees::{
    ActiveModel as AttendeeActiveModel, Column as AttendeeColumn, Entity as LiveSessionAttendees,
};
use crate::entity::live_sessions::{ActiveModel, Column, Entity as LiveSessions};
use crate::errors::{LangLearnError, Result};
use crate::models::{
    PaginationInfo,
    live_sessions::{
        entities::{LiveSession, LiveSessionAttendee, LiveSessionStatus},
        requests::{CreateLiveSessionRequest, LiveSessionListQuery, UpdateLiveSessionRequest},
        responses::LiveSessionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_live_session_impl(
        &self,
        host_id: i64,
        req: CreateLiveSessionRequest,
    ) -> Result<LiveSession> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            course_id: Set(req.course_id),
            language_id: Set(req.language_id),
            host_id: Set(host_id),
            scheduled_at: Set(req.scheduled_at.timestamp()),
            duration_minutes: Set(req.duration_minutes.unwrap_or(60)),
            meeting_url: Set(req.meeting_url),
            max_participants: Set(req.max_participants.unwrap_or(0)),
            status: Set(LiveSessionStatus::Scheduled.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("创建直播失败: {e}")))?;

        Ok(result.into_live_session())
    }

    pub async fn get_live_session_by_id_impl(&self, id: i64) -> Result<Option<LiveSession>> {
        let result = LiveSessions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询直播失败: {e}")))?;

        Ok(result.map(|m| m.into_live_session()))
    }

    /// 按开播时间升序分页列出
    pub async fn list_live_sessions_impl(
        &self,
        query: LiveSessionListQuery,
    ) -> Result<LiveSessionListResponse> {
        let page = query.page.max(1);
        let size = query.size.clamp(1, 100);

        let mut select = LiveSessions::find();
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(after) = query.scheduled_after {
            select = select.filter(Column::ScheduledAt.gte(after.timestamp()));
        }

        let paginator = select
            .order_by_asc(Column::ScheduledAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询直播总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询直播页数失败: {e}")))?;
        let sessions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询直播列表失败: {e}")))?;

        Ok(LiveSessionListResponse {
            items: sessions
                .into_iter()
                .map(|m| m.into_live_session())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_live_session_impl(
        &self,
        id: i64,
        update: UpdateLiveSessionRequest,
    ) -> Result<Option<LiveSession>> {
        if self.get_live_session_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(course_id) = update.course_id {
            model.course_id = Set(Some(course_id));
        }
        if let Some(language_id) = update.language_id {
            model.language_id = Set(Some(language_id));
        }
        if let Some(scheduled_at) = update.scheduled_at {
            model.scheduled_at = Set(scheduled_at.timestamp());
        }
        if let Some(duration) = update.duration_minutes {
            model.duration_minutes = Set(duration);
        }
        if let Some(meeting_url) = update.meeting_url {
            model.meeting_url = Set(Some(meeting_url));
        }
        if let Some(max_participants) = update.max_participants {
            model.max_participants = Set(max_participants);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("更新直播失败: {e}")))?;

        Ok(Some(result.into_live_session()))
    }

    pub async fn update_live_session_status_impl(
        &self,
        id: i64,
        status: LiveSessionStatus,
    ) -> Result<Option<LiveSession>> {
        let result = LiveSessions::update_many()
            .col_expr(Column::Status, sea_orm::sea_query::Expr::value(status.to_string()))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("更新直播状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_live_session_by_id_impl(id).await
    }

    pub async fn delete_live_session_impl(&self, id: i64) -> Result<bool> {
        let result = LiveSessions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("删除直播失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn register_attendee_impl(
        &self,
        session_id: i64,
        user_id: i64,
    ) -> Result<LiveSessionAttendee> {
        let model = AttendeeActiveModel {
            session_id: Set(session_id),
            user_id: Set(user_id),
            registered_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("报名直播失败: {e}")))?;

        Ok(result.into_attendee())
    }

    pub async fn unregister_attendee_impl(&self, session_id: i64, user_id: i64) -> Result<bool> {
        let result = LiveSessionAttendees::delete_many()
            .filter(AttendeeColumn::SessionId.eq(session_id))
            .filter(AttendeeColumn::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("取消报名失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_attendee_impl(
        &self,
        session_id: i64,
        user_id: i64,
    ) -> Result<Option<LiveSessionAttendee>> {
        let result = LiveSessionAttendees::find()
            .filter(AttendeeColumn::SessionId.eq(session_id))
            .filter(AttendeeColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询报名记录失败: {e}")))?;

        Ok(result.map(|m| m.into_attendee()))
    }

    pub async fn list_attendees_impl(&self, session_id: i64) -> Result<Vec<LiveSessionAttendee>> {
        let result = LiveSessionAttendees::find()
            .filter(AttendeeColumn::SessionId.eq(session_id))
            .order_by_asc(AttendeeColumn::RegisteredAt)
            .all(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询报名列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attendee()).collect())
    }

    pub async fn count_attendees_impl(&self, session_id: i64) -> Result<i64> {
        let count = LiveSessionAttendees::find()
            .filter(AttendeeColumn::SessionId.eq(session_id))
            .count(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("统计报名人数失败: {e}")))?;

        Ok(count as i64)
    }
}
