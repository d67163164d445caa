use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LanguageService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::languages::requests::LanguageListParams;
use crate::models::users::entities::UserRole;
use crate::services::internal_error;

/// 语言列表，只有管理员可以查看已停用的语言
pub async fn list_languages(
    service: &LanguageService,
    request: &HttpRequest,
    query: LanguageListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let include_inactive =
        query.include_inactive.unwrap_or(false) && RequireJWT::has_role(request, &UserRole::Admin);

    match storage.list_languages(include_inactive).await {
        Ok(languages) => Ok(HttpResponse::Ok().json(ApiResponse::success(languages, "查询成功"))),
        Err(e) => Ok(internal_error("查询语言列表失败", e)),
    }
}
