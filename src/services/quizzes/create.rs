use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuizService;
use super::rules::validate_quiz_settings;
use crate::config::AppConfig;
use crate::models::quizzes::requests::CreateQuizRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, not_found};
use crate::utils::validate::validate_required_text;

pub async fn create_quiz(
    service: &QuizService,
    request: &HttpRequest,
    mut req: CreateQuizRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    req.title = match validate_required_text("Title", &req.title, 200) {
        Ok(title) => title,
        Err(msg) => return Ok(bad_request(ErrorCode::QuizValidationFailed, msg)),
    };
    if let Err(msg) = validate_quiz_settings(req.time_limit, req.passing_score, req.max_retakes) {
        return Ok(bad_request(ErrorCode::QuizValidationFailed, msg));
    }
    if req.passing_score.is_none() {
        req.passing_score = Some(AppConfig::get().quiz.default_passing_score);
    }

    // 关联的课程与语言必须存在
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

    match storage.create_quiz(user.id, req).await {
        Ok(quiz) => {
            info!("User {} created quiz {} ({})", user.id, quiz.id, quiz.title);
            Ok(HttpResponse::Created().json(ApiResponse::success(quiz, "测验创建成功")))
        }
        Err(e) => Ok(internal_error("创建测验失败", e)),
    }
}
