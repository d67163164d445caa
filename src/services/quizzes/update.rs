use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::rules::validate_quiz_settings;
use super::{QuizService, load_owned_quiz};
use crate::models::quizzes::requests::UpdateQuizRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, not_found};
use crate::utils::validate::validate_required_text;

pub async fn update_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    mut req: UpdateQuizRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_quiz(&storage, quiz_id, &user).await {
        return Ok(resp);
    }

    if let Some(ref title) = req.title {
        match validate_required_text("Title", title, 200) {
            Ok(title) => req.title = Some(title),
            Err(msg) => return Ok(bad_request(ErrorCode::QuizValidationFailed, msg)),
        }
    }
    if let Err(msg) = validate_quiz_settings(req.time_limit, req.passing_score, req.max_retakes) {
        return Ok(bad_request(ErrorCode::QuizValidationFailed, msg));
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

    match storage.update_quiz(quiz_id, req).await {
        Ok(Some(quiz)) => Ok(HttpResponse::Ok().json(ApiResponse::success(quiz, "测验更新成功"))),
        Ok(None) => Ok(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => Ok(internal_error("更新测验失败", e)),
    }
}
