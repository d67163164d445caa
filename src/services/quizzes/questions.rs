use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::rules::{check_question_removal, merge_question_update, validate_question};
use super::{QuizService, load_owned_quiz};
use crate::models::quizzes::{
    entities::Question,
    requests::{CreateQuestionRequest, UpdateQuestionRequest},
    responses::QuestionListResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, not_found};
use crate::storage::Storage;

/// 题目必须属于该测验
async fn load_question(
    storage: &Arc<dyn Storage>,
    quiz_id: i64,
    question_id: i64,
) -> Result<Question, HttpResponse> {
    match storage.get_question_by_id(question_id).await {
        Ok(Some(q)) if q.quiz_id == quiz_id => Ok(q),
        Ok(_) => Err(not_found(ErrorCode::QuestionNotFound, "题目不存在")),
        Err(e) => Err(internal_error("查询题目失败", e)),
    }
}

/// 完整题目（含答案），仅创建者与管理员可见
pub async fn list_questions(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_quiz(&storage, quiz_id, &user).await {
        return Ok(resp);
    }

    match storage.list_questions(quiz_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuestionListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(internal_error("查询题目列表失败", e)),
    }
}

pub async fn add_question(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    req: CreateQuestionRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_quiz(&storage, quiz_id, &user).await {
        return Ok(resp);
    }

    let draft = match validate_question(req) {
        Ok(draft) => draft,
        Err(msg) => return Ok(bad_request(ErrorCode::QuestionInvalid, msg)),
    };

    match storage.create_question(quiz_id, draft).await {
        Ok(question) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(question, "题目添加成功")))
        }
        Err(e) => Ok(internal_error("添加题目失败", e)),
    }
}

pub async fn update_question(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    question_id: i64,
    req: UpdateQuestionRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_quiz(&storage, quiz_id, &user).await {
        return Ok(resp);
    }
    let existing = match load_question(&storage, quiz_id, question_id).await {
        Ok(q) => q,
        Err(resp) => return Ok(resp),
    };

    let draft = match validate_question(merge_question_update(&existing, req)) {
        Ok(draft) => draft,
        Err(msg) => return Ok(bad_request(ErrorCode::QuestionInvalid, msg)),
    };

    match storage.update_question(question_id, draft).await {
        Ok(Some(question)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(question, "题目更新成功")))
        }
        Ok(None) => Ok(not_found(ErrorCode::QuestionNotFound, "题目不存在")),
        Err(e) => Ok(internal_error("更新题目失败", e)),
    }
}

/// 已发布的测验不能删掉最后一道题
pub async fn delete_question(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    question_id: i64,
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
    if let Err(resp) = load_question(&storage, quiz_id, question_id).await {
        return Ok(resp);
    }

    let question_count = match storage.count_questions(quiz_id).await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("统计题目失败", e)),
    };
    if let Err(rejection) = check_question_removal(&quiz, question_count) {
        return Ok(bad_request(rejection.error_code(), rejection.message()));
    }

    match storage.delete_question(question_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("题目已删除"))),
        Ok(false) => Ok(not_found(ErrorCode::QuestionNotFound, "题目不存在")),
        Err(e) => Ok(internal_error("删除题目失败", e)),
    }
}
