pub mod achievements;
pub mod auth;
pub mod courses;
pub mod languages;
pub mod live_sessions;
pub mod quizzes;
pub mod study_sessions;
pub mod system;
pub mod users;

pub use achievements::AchievementService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use languages::LanguageService;
pub use live_sessions::LiveSessionService;
pub use quizzes::QuizService;
pub use study_sessions::StudySessionService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse};
use std::fmt::Display;

use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

/// 当前登录用户，缺失时返回 401
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        ))
    })
}

/// 资源所有者或管理员才能修改
pub(crate) fn check_owner_or_admin(
    user: &User,
    owner_id: i64,
    code: ErrorCode,
    message: &str,
) -> Result<(), HttpResponse> {
    if user.is_admin() || user.id == owner_id {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message)))
    }
}

pub(crate) fn internal_error(context: &str, e: impl Display) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {e}"),
    ))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn conflict(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserRole, UserStatus};

    fn user(id: i64, role: UserRole) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            avatar_url: None,
            bio: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_owner_or_admin() {
        let owner = user(1, UserRole::Instructor);
        let other = user(2, UserRole::Instructor);
        let admin = user(3, UserRole::Admin);

        assert!(check_owner_or_admin(&owner, 1, ErrorCode::Forbidden, "x").is_ok());
        assert!(check_owner_or_admin(&admin, 1, ErrorCode::Forbidden, "x").is_ok());
        let denied = check_owner_or_admin(&other, 1, ErrorCode::Forbidden, "x").unwrap_err();
        assert_eq!(denied.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_missing_user_is_unauthorized() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let resp = current_user(&req).unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
