use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::achievements::requests::{
    AwardAchievementRequest, CreateAchievementRequest, UpdateAchievementRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AchievementService;
use crate::utils::{SafeIDI64, SafeUserIdI64};

static ACHIEVEMENT_SERVICE: Lazy<AchievementService> = Lazy::new(AchievementService::new_lazy);

pub async fn list_achievements(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACHIEVEMENT_SERVICE.list_achievements(&req).await
}

pub async fn create_achievement(
    req: HttpRequest,
    body: web::Json<CreateAchievementRequest>,
) -> ActixResult<HttpResponse> {
    ACHIEVEMENT_SERVICE
        .create_achievement(&req, body.into_inner())
        .await
}

pub async fn update_achievement(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateAchievementRequest>,
) -> ActixResult<HttpResponse> {
    ACHIEVEMENT_SERVICE
        .update_achievement(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_achievement(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ACHIEVEMENT_SERVICE.delete_achievement(&req, path.0).await
}

pub async fn award_achievement(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<AwardAchievementRequest>,
) -> ActixResult<HttpResponse> {
    ACHIEVEMENT_SERVICE
        .award_achievement(&req, path.0, body.into_inner())
        .await
}

pub async fn my_achievements(req: HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(&req) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        )));
    };
    ACHIEVEMENT_SERVICE.list_user_achievements(&req, user_id).await
}

pub async fn user_achievements(req: HttpRequest, path: SafeUserIdI64) -> ActixResult<HttpResponse> {
    ACHIEVEMENT_SERVICE.list_user_achievements(&req, path.0).await
}

// 配置路由
pub fn configure_achievement_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/achievements")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_achievements))
                    .route(
                        web::post()
                            .to(create_achievement)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(web::resource("/me").route(web::get().to(my_achievements)))
            .service(
                web::resource("/users/{user_id}")
                    .route(web::get().to(user_achievements))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(update_achievement))
                    .route(web::delete().to(delete_achievement))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
            )
            // 颁发成就 - 讲师和管理员
            .service(
                web::resource("/{id}/award")
                    .route(web::post().to(award_achievement))
                    .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
            ),
    );
}
