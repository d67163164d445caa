use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::rules::check_status_change;
use super::{QuizService, load_owned_quiz};
use crate::models::quizzes::requests::UpdateQuizStatusRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, not_found};

/// 发布或撤回测验，发布前至少要有一道题
pub async fn update_status(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    req: UpdateQuizStatusRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let quiz = match load_owned_quiz(&storage, quiz_id, &user).await {
        Ok(quiz) => quiz,
        Err(resp) => return Ok(resp),
    };
    if quiz.status == req.status {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(quiz, "测验状态未变化")));
    }

    let question_count = match storage.count_questions(quiz_id).await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("统计题目失败", e)),
    };
    if let Err(rejection) = check_status_change(&req.status, question_count) {
        return Ok(bad_request(rejection.error_code(), rejection.message()));
    }

    match storage.update_quiz_status(quiz_id, req.status).await {
        Ok(Some(quiz)) => {
            info!("Quiz {} status changed to {}", quiz_id, quiz.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(quiz, "测验状态已更新")))
        }
        Ok(None) => Ok(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => Ok(internal_error("更新测验状态失败", e)),
    }
}
