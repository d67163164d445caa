use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuizService, can_view, load_quiz};
use crate::models::quizzes::responses::QuizDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, not_found};

pub async fn get_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let quiz = match load_quiz(&storage, quiz_id).await {
        Ok(quiz) => quiz,
        Err(resp) => return Ok(resp),
    };
    if !can_view(&quiz, &user) {
        return Ok(not_found(ErrorCode::QuizNotFound, "测验不存在"));
    }

    let questions = match storage.list_questions(quiz_id).await {
        Ok(questions) => questions,
        Err(e) => return Ok(internal_error("查询题目失败", e)),
    };

    let response = QuizDetailResponse {
        question_count: questions.len() as i64,
        total_points: questions.iter().map(|q| i64::from(q.points)).sum(),
        quiz,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
