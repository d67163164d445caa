use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::common::PaginationQuery;
use crate::models::study_sessions::requests::{
    EndStudySessionRequest, StartStudySessionRequest, StudyStatsParams,
};
use crate::services::StudySessionService;
use crate::utils::SafeIDI64;

static STUDY_SESSION_SERVICE: Lazy<StudySessionService> =
    Lazy::new(StudySessionService::new_lazy);

pub async fn start_session(
    req: HttpRequest,
    body: Option<web::Json<StartStudySessionRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(|b| b.into_inner()).unwrap_or_default();
    STUDY_SESSION_SERVICE.start_session(&req, body).await
}

pub async fn end_session(
    req: HttpRequest,
    path: SafeIDI64,
    body: Option<web::Json<EndStudySessionRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(|b| b.into_inner()).unwrap_or_default();
    STUDY_SESSION_SERVICE.end_session(&req, path.0, body).await
}

pub async fn list_sessions(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    STUDY_SESSION_SERVICE
        .list_sessions(&req, query.into_inner())
        .await
}

pub async fn get_stats(
    req: HttpRequest,
    query: web::Query<StudyStatsParams>,
) -> ActixResult<HttpResponse> {
    STUDY_SESSION_SERVICE
        .get_stats(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_study_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/study-sessions")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_sessions))
            .route("/start", web::post().to(start_session))
            .route("/stats", web::get().to(get_stats))
            .route("/{id}/end", web::post().to(end_session)),
    );
}
