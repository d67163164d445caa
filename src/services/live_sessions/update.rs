use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LiveSessionService, load_hosted_session, validate_capacity};
use crate::models::live_sessions::requests::UpdateLiveSessionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, not_found};
use crate::utils::validate::validate_required_text;

/// 已结束或已取消的直播不能再修改
pub async fn update_session(
    service: &LiveSessionService,
    request: &HttpRequest,
    session_id: i64,
    mut req: UpdateLiveSessionRequest,
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
    if !session.status.accepts_registration() {
        return Ok(bad_request(ErrorCode::LiveSessionClosed, "直播已结束或已取消"));
    }

    if let Some(ref title) = req.title {
        match validate_required_text("Title", title, 200) {
            Ok(title) => req.title = Some(title),
            Err(msg) => return Ok(bad_request(ErrorCode::LiveSessionValidationFailed, msg)),
        }
    }
    if let Err(msg) = validate_capacity(req.duration_minutes, req.max_participants) {
        return Ok(bad_request(ErrorCode::LiveSessionValidationFailed, msg));
    }

    match storage.update_live_session(session_id, req).await {
        Ok(Some(session)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(session, "直播更新成功")))
        }
        Ok(None) => Ok(not_found(ErrorCode::LiveSessionNotFound, "直播不存在")),
        Err(e) => Ok(internal_error("更新直播失败", e)),
    }
}
