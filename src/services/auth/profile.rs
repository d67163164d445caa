use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::middlewares::require_jwt::user_cache_key;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取当前用户信息
    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 新邮箱需合法且未被其他用户使用
    let email = update_data.email.map(|e| e.trim().to_lowercase());
    if let Some(ref email) = email {
        if let Err(msg) = validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
        }

        match storage.get_user_by_email(email).await {
            Ok(Some(existing_user)) if existing_user.id != current_user.id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserEmailAlreadyExists,
                    "该邮箱已被使用",
                )));
            }
            Ok(_) => {}
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询用户失败: {e}"),
                    )),
                );
            }
        }
    }

    // 处理密码（如果提供了新密码）
    let hashed_password = if let Some(ref password) = update_data.password {
        // 验证密码策略
        if let Err(msg) = validate_password_simple(password) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserPasswordInvalid,
                msg,
            )));
        }

        match hash_password(password) {
            Ok(hash) => Some(hash),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("密码哈希失败: {e}"),
                    )),
                );
            }
        }
    } else {
        None
    };

    // 构建更新请求（不包含 role 和 status，普通用户无权修改）
    let storage_update = UpdateUserRequest {
        email,
        password: hashed_password,
        role: None,
        status: None,
        display_name: update_data.display_name,
        avatar_url: update_data.avatar_url,
        bio: update_data.bio,
    };

    match storage.update_user(current_user.id, storage_update).await {
        Ok(Some(user)) => {
            // 丢弃旧的用户缓存，下次请求重新加载
            if let Some(token) = JwtUtils::extract_access_token(request)
                && let Some(cache) = service.get_cache(request)
            {
                cache.remove(&user_cache_key(&token)).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "用户信息更新成功",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserUpdateFailed,
            format!("更新用户信息失败: {e}"),
        ))),
    }
}
