pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod registration;
pub mod status;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{check_owner_or_admin, internal_error, not_found};
use crate::models::ErrorCode;
use crate::models::live_sessions::{
    entities::LiveSession,
    requests::{
        CreateLiveSessionRequest, LiveSessionListParams, UpdateLiveSessionRequest,
        UpdateLiveSessionStatusRequest,
    },
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct LiveSessionService {
    storage: Option<Arc<dyn Storage>>,
}

impl LiveSessionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_sessions(
        &self,
        request: &HttpRequest,
        query: LiveSessionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_sessions(self, request, query).await
    }

    pub async fn create_session(
        &self,
        request: &HttpRequest,
        req: CreateLiveSessionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_session(self, request, req).await
    }

    pub async fn get_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_session(self, request, session_id).await
    }

    pub async fn update_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
        req: UpdateLiveSessionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_session(self, request, session_id, req).await
    }

    pub async fn delete_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_session(self, request, session_id).await
    }

    pub async fn update_status(
        &self,
        request: &HttpRequest,
        session_id: i64,
        req: UpdateLiveSessionStatusRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_status(self, request, session_id, req).await
    }

    // 报名
    pub async fn register(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        registration::register(self, request, session_id).await
    }

    pub async fn unregister(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        registration::unregister(self, request, session_id).await
    }

    pub async fn list_attendees(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        registration::list_attendees(self, request, session_id).await
    }
}

pub(crate) async fn load_session(
    storage: &Arc<dyn Storage>,
    session_id: i64,
) -> Result<LiveSession, HttpResponse> {
    match storage.get_live_session_by_id(session_id).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(not_found(ErrorCode::LiveSessionNotFound, "直播不存在")),
        Err(e) => Err(internal_error("查询直播失败", e)),
    }
}

/// 查询直播并校验主讲人或管理员权限
pub(crate) async fn load_hosted_session(
    storage: &Arc<dyn Storage>,
    session_id: i64,
    user: &User,
) -> Result<LiveSession, HttpResponse> {
    let session = load_session(storage, session_id).await?;
    check_owner_or_admin(
        user,
        session.host_id,
        ErrorCode::LiveSessionPermissionDenied,
        "只能管理自己主讲的直播",
    )?;
    Ok(session)
}

/// 时长必须为正，人数上限不能为负（0 为不限）
pub(crate) fn validate_capacity(
    duration_minutes: Option<i32>,
    max_participants: Option<i32>,
) -> Result<(), &'static str> {
    if duration_minutes.is_some_and(|d| d <= 0) {
        return Err("Duration must be greater than 0");
    }
    if max_participants.is_some_and(|m| m < 0) {
        return Err("Max participants cannot be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity(None, None).is_ok());
        assert!(validate_capacity(Some(45), Some(0)).is_ok());
        assert!(validate_capacity(Some(0), None).is_err());
        assert!(validate_capacity(None, Some(-1)).is_err());
    }
}
