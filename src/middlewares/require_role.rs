/*!
 * 角色访问控制中间件
 *
 * 依赖 RequireJWT 写入请求扩展的用户，必须包在 RequireJWT 之内：
 *
 * ```rust,ignore
 * web::scope("/api/v1/languages")
 *     .wrap(RequireJWT)
 *     .service(
 *         web::resource("")
 *             .route(web::post().to(create_language).wrap(RequireRole::new_any(UserRole::admin_roles()))),
 *     )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::{ErrorCode, users::entities::UserRole};

use super::create_error_response;

#[derive(Clone, Debug)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    /// 允许列表中任一角色通过
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed: roles.iter().map(|r| (*r).clone()).collect(),
        }
    }

    fn permits(&self, role: &UserRole) -> bool {
        self.allowed.contains(role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            policy: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    policy: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
            let Some(user) = RequireJWT::extract_user_claims(req.request()) else {
                info!("Role check without authenticated user, is RequireJWT applied?");
                let resp = create_error_response(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "Authentication required",
                );
                return Ok(req.into_response(resp).map_into_right_body());
            };

            if !policy.permits(&user.role) {
                info!(
                    "Access denied for user {} (role: {}), allowed: {:?}",
                    user.id, user.role, policy.allowed
                );
                let resp = create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::Forbidden,
                    "Access denied: insufficient role",
                );
                return Ok(req.into_response(resp).map_into_right_body());
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructor_roles_policy() {
        let policy = RequireRole::new_any(UserRole::instructor_roles());
        assert!(policy.permits(&UserRole::Instructor));
        assert!(policy.permits(&UserRole::Admin));
        assert!(!policy.permits(&UserRole::Student));
    }

    #[test]
    fn test_admin_roles_policy() {
        let policy = RequireRole::new_any(UserRole::admin_roles());
        assert!(policy.permits(&UserRole::Admin));
        assert!(!policy.permits(&UserRole::Instructor));
    }
}
