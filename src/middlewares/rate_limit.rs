/*!
 * 速率限制中间件
 *
 * 固定窗口计数：同一限制键在一个窗口内的请求数超过上限即返回 429。
 * 已认证请求按用户 ID 计数，否则按客户端 IP 计数。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login));
 * ```
 *
 * 作答提交等需要按用户计数的路由，必须放在 `RequireJWT` 之内。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

/// 计数缓存，键包含窗口序号，过期只负责回收旧窗口
static RATE_LIMIT_COUNTERS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(15 * 60))
        .max_capacity(100_000)
        .build()
});

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";

#[derive(Clone, Debug)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    scope: &'static str,
}

impl RateLimit {
    pub fn new(scope: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.max(1),
            scope,
        }
    }

    /// 登录：5 次/分钟/IP
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 注册：3 次/分钟/IP
    pub fn register() -> Self {
        Self::new("register", 3, 60)
    }

    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 测验提交：10 次/分钟/用户
    pub fn attempt_submit() -> Self {
        Self::new("attempt_submit", 10, 60)
    }

    fn counter_key(&self, identity: &str, now_secs: u64) -> String {
        format!("{}:{}:{}", self.scope, identity, now_secs / self.window_secs)
    }

    /// 当前窗口剩余秒数
    fn retry_after(&self, now_secs: u64) -> u64 {
        self.window_secs - now_secs % self.window_secs
    }
}

/// 连接地址优先，其次 X-Forwarded-For 的第一个地址，再次 X-Real-IP
fn client_ip(req: &ServiceRequest) -> String {
    let parse = |raw: &str| raw.trim().parse::<IpAddr>().ok();

    let from_conn = req.connection_info().realip_remote_addr().and_then(parse);
    let from_forwarded = || {
        req.headers()
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(parse)
    };
    let from_real_ip = || {
        req.headers()
            .get("X-Real-IP")
            .and_then(|v| v.to_str().ok())
            .and_then(parse)
    };

    from_conn
        .or_else(from_forwarded)
        .or_else(from_real_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn request_identity(req: &ServiceRequest) -> String {
    match req.extensions().get::<User>() {
        Some(user) => format!("user:{}", user.id),
        None => format!("ip:{}", client_ip(req)),
    }
}

fn too_many_requests(limit: u32, retry_after: u64) -> HttpResponse {
    HttpResponse::TooManyRequests()
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header((LIMIT_HEADER, limit.to_string()))
        .insert_header((REMAINING_HEADER, "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "请求过于频繁，请稍后再试",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            policy: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    policy: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let policy = self.policy.clone();

        Box::pin(async move {
            let now = chrono::Utc::now().timestamp().max(0) as u64;
            let key = policy.counter_key(&request_identity(&req), now);

            let used = RATE_LIMIT_COUNTERS.get(&key).await.unwrap_or(0);
            if used >= policy.max_requests {
                warn!("Rate limit exceeded: {} ({}/{})", key, used, policy.max_requests);
                let resp = too_many_requests(policy.max_requests, policy.retry_after(now));
                return Ok(req.into_response(resp).map_into_right_body());
            }
            RATE_LIMIT_COUNTERS.insert(key, used + 1).await;

            let remaining = policy.max_requests.saturating_sub(used + 1);
            let mut res = srv.call(req).await?.map_into_left_body();
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static(LIMIT_HEADER),
                HeaderValue::from(policy.max_requests),
            );
            headers.insert(
                HeaderName::from_static(REMAINING_HEADER),
                HeaderValue::from(remaining),
            );
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!((login.max_requests, login.window_secs), (5, 60));
        assert_eq!(RateLimit::register().max_requests, 3);
        assert_eq!(RateLimit::refresh_token().scope, "refresh");
        assert_eq!(RateLimit::attempt_submit().max_requests, 10);
    }

    #[test]
    fn test_counter_key_changes_per_window() {
        let limit = RateLimit::new("t", 1, 60);
        assert_eq!(limit.counter_key("ip:1.2.3.4", 120), limit.counter_key("ip:1.2.3.4", 179));
        assert_ne!(limit.counter_key("ip:1.2.3.4", 179), limit.counter_key("ip:1.2.3.4", 180));
        assert_ne!(limit.counter_key("user:1", 120), limit.counter_key("user:2", 120));
    }

    #[test]
    fn test_retry_after() {
        let limit = RateLimit::new("t", 1, 60);
        assert_eq!(limit.retry_after(120), 60);
        assert_eq!(limit.retry_after(150), 30);
        assert_eq!(RateLimit::new("z", 1, 0).window_secs, 1);
    }
}
