use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::common::PaginationQuery;
use crate::models::quizzes::requests::{
    CreateQuestionRequest, CreateQuizRequest, QuizListParams, SubmitAttemptRequest,
    UpdateQuestionRequest, UpdateQuizRequest, UpdateQuizStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::QuizService;
use crate::utils::{SafeAttemptIdI64, SafeIDI64, SafeQuestionIdI64};

static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

pub async fn list_quizzes(
    req: HttpRequest,
    query: web::Query<QuizListParams>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_quizzes(&req, query.into_inner()).await
}

pub async fn create_quiz(
    req: HttpRequest,
    body: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.create_quiz(&req, body.into_inner()).await
}

pub async fn get_quiz(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(&req, path.0).await
}

pub async fn update_quiz(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .update_quiz(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_quiz(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_quiz(&req, path.0).await
}

pub async fn update_status(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateQuizStatusRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .update_status(&req, path.0, body.into_inner())
        .await
}

pub async fn list_questions(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_questions(&req, path.0).await
}

pub async fn add_question(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .add_question(&req, path.0, body.into_inner())
        .await
}

pub async fn update_question(
    req: HttpRequest,
    quiz_id: SafeIDI64,
    question_id: SafeQuestionIdI64,
    body: web::Json<UpdateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .update_question(&req, quiz_id.0, question_id.0, body.into_inner())
        .await
}

pub async fn delete_question(
    req: HttpRequest,
    quiz_id: SafeIDI64,
    question_id: SafeQuestionIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .delete_question(&req, quiz_id.0, question_id.0)
        .await
}

pub async fn start_attempt(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.start_attempt(&req, path.0).await
}

pub async fn submit_attempt(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SubmitAttemptRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .submit_attempt(&req, path.0, body.into_inner())
        .await
}

pub async fn list_my_attempts(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_my_attempts(&req, path.0).await
}

pub async fn list_quiz_attempts(
    req: HttpRequest,
    path: SafeIDI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .list_quiz_attempts(&req, path.0, query.into_inner())
        .await
}

pub async fn get_attempt(
    req: HttpRequest,
    quiz_id: SafeIDI64,
    attempt_id: SafeAttemptIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_attempt(&req, quiz_id.0, attempt_id.0).await
}

// 配置路由
pub fn configure_quiz_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/quizzes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 测验列表 - 所有登录用户（学员只看到已发布测验）
                    .route(web::get().to(list_quizzes))
                    // 创建测验 - 讲师和管理员
                    .route(
                        web::post()
                            .to(create_quiz)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_quiz))
                    // 更新、删除 - 讲师和管理员，业务层校验创建者
                    .route(
                        web::put()
                            .to(update_quiz)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_quiz)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/status")
                    .route(web::put().to(update_status))
                    .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
            )
            // 题目管理 - 讲师和管理员
            .service(
                web::resource("/{id}/questions")
                    .route(web::get().to(list_questions))
                    .route(web::post().to(add_question))
                    .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
            )
            .service(
                web::resource("/{id}/questions/{question_id}")
                    .route(web::put().to(update_question))
                    .route(web::delete().to(delete_question))
                    .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
            )
            // 作答
            .service(web::resource("/{id}/attempts/start").route(web::post().to(start_attempt)))
            .service(web::resource("/{id}/attempts/me").route(web::get().to(list_my_attempts)))
            .service(
                web::resource("/{id}/attempts")
                    .route(
                        web::post()
                            .to(submit_attempt)
                            .wrap(middlewares::RateLimit::attempt_submit()),
                    )
                    // 全部作答 - 讲师和管理员，业务层校验创建者
                    .route(
                        web::get()
                            .to(list_quiz_attempts)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/attempts/{attempt_id}").route(web::get().to(get_attempt)),
            ),
    );
}
