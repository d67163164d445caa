use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LiveSessionService, load_hosted_session, load_session};
use crate::models::live_sessions::responses::AttendeeListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, conflict, current_user, internal_error, not_found};

/// 报名直播：已结束或已取消的直播不接受报名，满员后拒绝
pub async fn register(
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
    if !session.status.accepts_registration() {
        return Ok(bad_request(ErrorCode::LiveSessionClosed, "直播已结束或已取消"));
    }

    match storage.get_attendee(session_id, user.id).await {
        Ok(Some(_)) => {
            return Ok(conflict(ErrorCode::LiveSessionAlreadyRegistered, "已报名该直播"));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("查询报名记录失败", e)),
    }

    match storage.count_attendees(session_id).await {
        Ok(count) if session.is_full(count) => {
            return Ok(conflict(ErrorCode::LiveSessionFull, "直播报名人数已满"));
        }
        Ok(_) => {}
        Err(e) => return Ok(internal_error("统计报名人数失败", e)),
    }

    match storage.register_attendee(session_id, user.id).await {
        Ok(attendee) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(attendee, "报名成功")))
        }
        Err(e) => Ok(internal_error("报名失败", e)),
    }
}

pub async fn unregister(
    service: &LiveSessionService,
    request: &HttpRequest,
    session_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.unregister_attendee(session_id, user.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("已取消报名"))),
        Ok(false) => Ok(not_found(ErrorCode::LiveSessionNotRegistered, "未报名该直播")),
        Err(e) => Ok(internal_error("取消报名失败", e)),
    }
}

/// 报名名单（主讲人或管理员）
pub async fn list_attendees(
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

    match storage.list_attendees(session_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendeeListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(internal_error("查询报名名单失败", e)),
    }
}
