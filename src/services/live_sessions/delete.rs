use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LiveSessionService, load_hosted_session};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, not_found};

pub async fn delete_session(
    service: &LiveSessionService,
    request: &HttpRequest,
    session_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_hosted_session(&storage, session_id, &user).await {
        return Ok(resp);
    }

    match storage.delete_live_session(session_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("直播已删除"))),
        Ok(false) => Ok(not_found(ErrorCode::LiveSessionNotFound, "直播不存在")),
        Err(e) => Ok(internal_error("删除直播失败", e)),
    }
}
