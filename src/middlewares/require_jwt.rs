/*!
 * JWT 认证中间件
 *
 * 令牌来自 `Authorization: Bearer` 头或 `access_token` cookie。校验通过且用户处于
 * 激活状态时，把 `User` 写入请求扩展，处理函数通过 `RequireJWT::extract_user_claims`
 * 或 `RequireJWT::extract_user_id` 取用。用户按令牌缓存，过期时间不超过令牌剩余有效期。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::users::entities::{User, UserRole, UserStatus};
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::fmt;
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

/// 用户缓存键
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

#[derive(Debug, PartialEq, Eq)]
enum JwtRejection {
    MissingToken,
    InvalidToken,
    InvalidSubject,
    UserNotFound,
    UserInactive,
    Misconfigured(&'static str),
    StorageUnavailable,
}

impl fmt::Display for JwtRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JwtRejection::MissingToken => write!(f, "Missing access token"),
            JwtRejection::InvalidToken => write!(f, "Invalid JWT token"),
            JwtRejection::InvalidSubject => write!(f, "Invalid user ID in JWT"),
            JwtRejection::UserNotFound => write!(f, "User not found"),
            JwtRejection::UserInactive => write!(f, "User is not active"),
            JwtRejection::Misconfigured(what) => write!(f, "{what} not configured"),
            JwtRejection::StorageUnavailable => write!(f, "Failed to load user"),
        }
    }
}

fn app_state<T: ?Sized + 'static>(
    req: &ServiceRequest,
    name: &'static str,
) -> Result<Arc<T>, JwtRejection> {
    req.app_data::<web::Data<Arc<T>>>()
        .map(|data| data.get_ref().clone())
        .ok_or(JwtRejection::Misconfigured(name))
}

async fn cached_user(cache: &Arc<dyn ObjectCache>, key: &str) -> Option<User> {
    match cache.get_raw(key).await {
        CacheResult::Found(json) => match serde_json::from_str::<User>(&json) {
            Ok(user) => Some(user),
            Err(_) => {
                info!("Dropping undecodable cached user entry");
                cache.remove(key).await;
                None
            }
        },
        _ => None,
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<User, JwtRejection> {
    let token =
        JwtUtils::extract_access_token(req.request()).ok_or(JwtRejection::MissingToken)?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        debug!("JWT token validation failed: {}", err);
        JwtRejection::InvalidToken
    })?;

    let cache = app_state::<dyn ObjectCache>(req, "Cache")?;
    let cache_key = user_cache_key(&token);
    if let Some(user) = cached_user(&cache, &cache_key).await {
        return Ok(user);
    }

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| JwtRejection::InvalidSubject)?;

    let storage = app_state::<dyn Storage>(req, "Storage")?;
    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|_| JwtRejection::StorageUnavailable)?
        .ok_or(JwtRejection::UserNotFound)?;

    if user.status != UserStatus::Active {
        return Err(JwtRejection::UserInactive);
    }

    let remaining = (claims.exp as i64 - chrono::Utc::now().timestamp()).max(1) as u64;
    if let Ok(json) = serde_json::to_string(&user) {
        let ttl = AppConfig::get().cache.default_ttl.min(remaining);
        cache.insert_raw(cache_key, json, ttl).await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前请求的用户，仅在 RequireJWT 之内有值
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn has_role(req: &actix_web::HttpRequest, role: &UserRole) -> bool {
        req.extensions()
            .get::<User>()
            .is_some_and(|user| &user.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_cache_key() {
        assert_eq!(user_cache_key("abc"), "user:abc");
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(JwtRejection::MissingToken.to_string(), "Missing access token");
        assert_eq!(
            JwtRejection::Misconfigured("Cache").to_string(),
            "Cache not configured"
        );
    }
}
