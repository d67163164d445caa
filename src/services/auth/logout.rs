use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::user_cache_key;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 处理用户登出
/// 清除两个令牌 cookie（max_age=0），并丢弃该令牌对应的用户缓存
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(token) = JwtUtils::extract_access_token(request)
        && let Some(cache) = service.get_cache(request)
    {
        cache.remove(&user_cache_key(&token)).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_access_token_cookie())
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::<()>::success_empty("登出成功")))
}
