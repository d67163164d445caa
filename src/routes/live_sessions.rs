use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::live_sessions::requests::{
    CreateLiveSessionRequest, LiveSessionListParams, UpdateLiveSessionRequest,
    UpdateLiveSessionStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::LiveSessionService;
use crate::utils::SafeIDI64;

static LIVE_SESSION_SERVICE: Lazy<LiveSessionService> = Lazy::new(LiveSessionService::new_lazy);

pub async fn list_sessions(
    req: HttpRequest,
    query: web::Query<LiveSessionListParams>,
) -> ActixResult<HttpResponse> {
    LIVE_SESSION_SERVICE
        .list_sessions(&req, query.into_inner())
        .await
}

pub async fn create_session(
    req: HttpRequest,
    body: web::Json<CreateLiveSessionRequest>,
) -> ActixResult<HttpResponse> {
    LIVE_SESSION_SERVICE
        .create_session(&req, body.into_inner())
        .await
}

pub async fn get_session(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LIVE_SESSION_SERVICE.get_session(&req, path.0).await
}

pub async fn update_session(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateLiveSessionRequest>,
) -> ActixResult<HttpResponse> {
    LIVE_SESSION_SERVICE
        .update_session(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_session(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LIVE_SESSION_SERVICE.delete_session(&req, path.0).await
}

pub async fn update_status(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateLiveSessionStatusRequest>,
) -> ActixResult<HttpResponse> {
    LIVE_SESSION_SERVICE
        .update_status(&req, path.0, body.into_inner())
        .await
}

pub async fn register(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LIVE_SESSION_SERVICE.register(&req, path.0).await
}

pub async fn unregister(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LIVE_SESSION_SERVICE.unregister(&req, path.0).await
}

pub async fn list_attendees(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LIVE_SESSION_SERVICE.list_attendees(&req, path.0).await
}

// 配置路由
pub fn configure_live_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/live-sessions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_sessions))
                    // 创建直播 - 讲师和管理员
                    .route(
                        web::post()
                            .to(create_session)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_session))
                    // 更新、删除 - 业务层校验主讲人或管理员
                    .route(web::put().to(update_session))
                    .route(web::delete().to(delete_session)),
            )
            .service(web::resource("/{id}/status").route(web::put().to(update_status)))
            .service(
                web::resource("/{id}/register")
                    .route(web::post().to(register))
                    .route(web::delete().to(unregister)),
            )
            .service(web::resource("/{id}/attendees").route(web::get().to(list_attendees))),
    );
}
