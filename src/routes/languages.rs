use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::languages::requests::{
    CreateLanguageRequest, LanguageListParams, UpdateLanguageRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::LanguageService;
use crate::utils::SafeIDI64;

static LANGUAGE_SERVICE: Lazy<LanguageService> = Lazy::new(LanguageService::new_lazy);

pub async fn list_languages(
    req: HttpRequest,
    query: web::Query<LanguageListParams>,
) -> ActixResult<HttpResponse> {
    LANGUAGE_SERVICE
        .list_languages(&req, query.into_inner())
        .await
}

pub async fn create_language(
    req: HttpRequest,
    body: web::Json<CreateLanguageRequest>,
) -> ActixResult<HttpResponse> {
    LANGUAGE_SERVICE
        .create_language(&req, body.into_inner())
        .await
}

pub async fn update_language(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateLanguageRequest>,
) -> ActixResult<HttpResponse> {
    LANGUAGE_SERVICE
        .update_language(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_language(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LANGUAGE_SERVICE.delete_language(&req, path.0).await
}

// 配置路由
pub fn configure_language_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/languages")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 语言列表 - 所有登录用户
                    .route(web::get().to(list_languages))
                    // 新增语言 - 仅管理员
                    .route(
                        web::post()
                            .to(create_language)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(update_language))
                    .route(web::delete().to(delete_language))
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
            ),
    );
}
