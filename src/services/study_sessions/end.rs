use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudySessionService;
use crate::models::study_sessions::requests::EndStudySessionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, not_found};

/// 结束计时，时长由服务端计算
pub async fn end_session(
    service: &StudySessionService,
    request: &HttpRequest,
    session_id: i64,
    req: EndStudySessionRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let session = match storage.get_study_session_by_id(session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => return Ok(not_found(ErrorCode::StudySessionNotFound, "学习记录不存在")),
        Err(e) => return Ok(internal_error("查询学习记录失败", e)),
    };
    if session.user_id != user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::StudySessionPermissionDenied,
            "只能结束自己的学习记录",
        )));
    }
    if !session.is_open() {
        return Ok(bad_request(ErrorCode::StudySessionAlreadyEnded, "学习记录已结束"));
    }

    match storage
        .end_study_session(session_id, chrono::Utc::now(), req.notes)
        .await
    {
        Ok(Some(session)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(session, "学习记录已结束")))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudySessionNotFound, "学习记录不存在")),
        Err(e) => Ok(internal_error("结束学习记录失败", e)),
    }
}
