use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LiveSessionService, load_session};
use crate::models::ApiResponse;
use crate::models::live_sessions::responses::LiveSessionDetailResponse;
use crate::services::{current_user, internal_error};

pub async fn get_session(
    service: &LiveSessionService,
    request: &HttpRequest,
    session_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let session = match load_session(&storage, session_id).await {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };
    let attendee_count = match storage.count_attendees(session_id).await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("统计报名人数失败", e)),
    };
    let is_registered = match storage.get_attendee(session_id, user.id).await {
        Ok(attendee) => attendee.is_some(),
        Err(e) => return Ok(internal_error("查询报名记录失败", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        LiveSessionDetailResponse {
            session,
            attendee_count,
            is_registered,
        },
        "查询成功",
    )))
}
