use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    Ok(match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => {
            HttpResponse::Ok().json(ApiResponse::success(UserResponse { user }, "用户信息获取成功"))
        }
        Ok(None) => not_found(ErrorCode::UserNotFound, "用户不存在"),
        Err(e) => internal_error("获取用户信息失败", e),
    })
}
