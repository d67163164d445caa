use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{LiveSessionService, validate_capacity};
use crate::models::live_sessions::requests::CreateLiveSessionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, not_found};
use crate::utils::validate::validate_required_text;

/// 创建直播，创建者为主讲人
pub async fn create_session(
    service: &LiveSessionService,
    request: &HttpRequest,
    mut req: CreateLiveSessionRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    req.title = match validate_required_text("Title", &req.title, 200) {
        Ok(title) => title,
        Err(msg) => return Ok(bad_request(ErrorCode::LiveSessionValidationFailed, msg)),
    };
    if let Err(msg) = validate_capacity(req.duration_minutes, req.max_participants) {
        return Ok(bad_request(ErrorCode::LiveSessionValidationFailed, msg));
    }

    if let Some(course_id) = req.course_id {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "课程不存在")),
            Err(e) => return Ok(internal_error("查询课程失败", e)),
        }
    }
    if let Some(language_id) = req.language_id {
        match storage.get_language_by_id(language_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(not_found(ErrorCode::LanguageNotFound, "语言不存在")),
            Err(e) => return Ok(internal_error("查询语言失败", e)),
        }
    }

    match storage.create_live_session(user.id, req).await {
        Ok(session) => {
            info!(
                "User {} scheduled live session {} at {}",
                user.id, session.id, session.scheduled_at
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(session, "直播创建成功")))
        }
        Err(e) => Ok(internal_error("创建直播失败", e)),
    }
}
