use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, not_found};

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if operator.id == user_id {
        return Ok(bad_request(ErrorCode::CanNotDeleteCurrentUser, "不能删除当前登录的用户"));
    }

    let storage = service.get_storage(request);
    Ok(match storage.delete_user(user_id).await {
        Ok(true) => {
            info!("User {} deleted by admin {}", user_id, operator.id);
            HttpResponse::Ok().json(ApiResponse::success_empty("用户已删除"))
        }
        Ok(false) => not_found(ErrorCode::UserNotFound, "用户不存在"),
        Err(e) => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::UserDeleteFailed,
            format!("删除用户失败: {e}"),
        )),
    })
}
