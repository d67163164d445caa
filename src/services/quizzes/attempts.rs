use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use rand::seq::SliceRandom;
use tracing::info;

use super::rules::{AttemptRejection, check_can_attempt, check_time_limit, remaining_attempts};
use super::scoring::{build_feedback, grade_submission};
use super::{QuizService, can_view, load_owned_quiz, load_quiz};
use crate::config::AppConfig;
use crate::errors::LangLearnError;
use crate::models::common::PaginationQuery;
use crate::models::quizzes::{
    entities::{NewQuizAttempt, PublicQuestion},
    requests::SubmitAttemptRequest,
    responses::{AttemptResultResponse, MyAttemptsResponse, StartAttemptResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{check_owner_or_admin, conflict, current_user, internal_error, not_found};

fn rejection_response(rejection: &AttemptRejection) -> HttpResponse {
    HttpResponse::build(rejection.status()).json(ApiResponse::error_empty(
        rejection.error_code(),
        rejection.message(),
    ))
}

/// 开始作答：下发去掉答案的题目，按需打乱顺序
pub async fn start_attempt(
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
    let prior = match storage.count_user_attempts(quiz_id, user.id).await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("统计作答次数失败", e)),
    };
    if let Err(rejection) = check_can_attempt(&quiz, prior) {
        return Ok(rejection_response(&rejection));
    }

    let questions = match storage.list_questions(quiz_id).await {
        Ok(questions) => questions,
        Err(e) => return Ok(internal_error("查询题目失败", e)),
    };
    if questions.is_empty() {
        return Ok(rejection_response(&AttemptRejection::NoQuestions));
    }

    let mut public: Vec<PublicQuestion> = questions.iter().map(PublicQuestion::from).collect();
    if quiz.randomize_question_order {
        public.shuffle(&mut rand::rng());
    }

    let response = StartAttemptResponse {
        quiz_id,
        title: quiz.title,
        time_limit: quiz.time_limit,
        started_at: Utc::now(),
        attempt_number: (prior + 1) as i32,
        total_points: questions.iter().map(|q| i64::from(q.points)).sum(),
        questions: public,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "开始作答")))
}

/// 提交作答：校验限时与重做策略后判分并保存
pub async fn submit_attempt(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    req: SubmitAttemptRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);
    let now = Utc::now();

    let quiz = match load_quiz(&storage, quiz_id).await {
        Ok(quiz) => quiz,
        Err(resp) => return Ok(resp),
    };
    let prior = match storage.count_user_attempts(quiz_id, user.id).await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("统计作答次数失败", e)),
    };
    if let Err(rejection) = check_can_attempt(&quiz, prior) {
        return Ok(rejection_response(&rejection));
    }

    let grace = AppConfig::get().quiz.submit_grace_seconds;
    if let Err(rejection) = check_time_limit(quiz.time_limit, req.start_time, now, grace) {
        info!(
            "User {} submitted quiz {} after the time limit of {} minutes",
            user.id, quiz_id, quiz.time_limit
        );
        return Ok(rejection_response(&rejection));
    }

    let questions = match storage.list_questions(quiz_id).await {
        Ok(questions) => questions,
        Err(e) => return Ok(internal_error("查询题目失败", e)),
    };
    if questions.is_empty() {
        return Ok(rejection_response(&AttemptRejection::NoQuestions));
    }

    let graded = match grade_submission(&questions, &req.answers, quiz.passing_score) {
        Ok(graded) => graded,
        Err(rejection) => return Ok(rejection_response(&rejection)),
    };

    let feedback = quiz
        .show_answers_after_submission
        .then(|| build_feedback(&questions, &graded.answers));

    let attempt = NewQuizAttempt {
        quiz_id,
        user_id: user.id,
        answers: graded.answers,
        started_at: req.start_time,
        completed_at: now,
        earned_points: graded.earned_points,
        total_points: graded.total_points,
        score: graded.score,
        passed: graded.passed,
        attempt_number: (prior + 1) as i32,
    };

    match storage.record_attempt(attempt, &quiz.title).await {
        Ok(attempt) => {
            info!(
                "User {} finished quiz {} attempt #{}: score {:.2}, passed {}",
                user.id, quiz_id, attempt.attempt_number, attempt.score, attempt.passed
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                AttemptResultResponse { attempt, feedback },
                "提交成功",
            )))
        }
        Err(LangLearnError::Conflict(msg)) => {
            info!("User {} quiz {} attempt conflict: {}", user.id, quiz_id, msg);
            Ok(conflict(ErrorCode::AttemptInvalid, "作答已被提交，请刷新后重试"))
        }
        Err(e) => Ok(internal_error("保存作答记录失败", e)),
    }
}

/// 当前用户在该测验的作答记录
pub async fn list_my_attempts(
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

    match storage.list_user_attempts(quiz_id, user.id).await {
        Ok(items) => {
            let best_score = items.iter().map(|a| a.score).reduce(f64::max);
            let remaining = remaining_attempts(&quiz, items.len() as i64);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                MyAttemptsResponse {
                    items,
                    best_score,
                    remaining_attempts: remaining,
                },
                "查询成功",
            )))
        }
        Err(e) => Ok(internal_error("查询作答记录失败", e)),
    }
}

/// 测验的全部作答（创建者或管理员）
pub async fn list_quiz_attempts(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_quiz(&storage, quiz_id, &user).await {
        return Ok(resp);
    }

    let (page, size) = query.normalized();
    match storage.list_quiz_attempts(quiz_id, page, size).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(internal_error("查询作答列表失败", e)),
    }
}

/// 单次作答详情：作答者本人、测验创建者或管理员
pub async fn get_attempt(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    attempt_id: i64,
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

    let attempt = match storage.get_attempt_by_id(attempt_id).await {
        Ok(Some(attempt)) if attempt.quiz_id == quiz_id => attempt,
        Ok(_) => return Ok(not_found(ErrorCode::AttemptNotFound, "作答记录不存在")),
        Err(e) => return Ok(internal_error("查询作答记录失败", e)),
    };

    if attempt.user_id != user.id
        && let Err(resp) = check_owner_or_admin(
            &user,
            quiz.created_by,
            ErrorCode::Forbidden,
            "无权查看该作答记录",
        )
    {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(attempt, "查询成功")))
}
