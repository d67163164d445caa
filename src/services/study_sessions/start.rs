use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudySessionService;
use crate::models::study_sessions::requests::StartStudySessionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{conflict, current_user, internal_error, not_found};

/// 开始计时，同一时间只能有一条未结束的记录
pub async fn start_session(
    service: &StudySessionService,
    request: &HttpRequest,
    req: StartStudySessionRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_open_study_session(user.id).await {
        Ok(Some(open)) => {
            return Ok(conflict(
                ErrorCode::StudySessionAlreadyActive,
                format!("已有进行中的学习记录 (id: {})，请先结束", open.id),
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("查询学习记录失败", e)),
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

    match storage.start_study_session(user.id, req).await {
        Ok(session) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(session, "开始学习")))
        }
        Err(e) => Ok(internal_error("开始学习记录失败", e)),
    }
}
