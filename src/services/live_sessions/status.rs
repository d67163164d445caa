use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{LiveSessionService, load_hosted_session};
use crate::models::live_sessions::requests::UpdateLiveSessionStatusRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, not_found};

pub async fn update_status(
    service: &LiveSessionService,
    request: &HttpRequest,
    session_id: i64,
    req: UpdateLiveSessionStatusRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let session = match load_hosted_session(&storage, session_id, &user).await {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };
    if !session.status.can_transition_to(req.status) {
        return Ok(bad_request(
            ErrorCode::LiveSessionStatusInvalid,
            format!("不能从 {} 变更为 {}", session.status, req.status),
        ));
    }

    match storage.update_live_session_status(session_id, req.status).await {
        Ok(Some(session)) => {
            info!("Live session {} is now {}", session_id, session.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(session, "直播状态已更新")))
        }
        Ok(None) => Ok(not_found(ErrorCode::LiveSessionNotFound, "直播不存在")),
        Err(e) => Ok(internal_error("更新直播状态失败", e)),
    }
}
