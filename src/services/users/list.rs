use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse,
    users::requests::{UserListParams, UserListQuery},
};
use crate::services::internal_error;

/// 管理员查看用户列表，支持角色、状态与关键字筛选
pub async fn list_users(
    service: &UserService,
    params: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    Ok(
        match storage
            .list_users_with_pagination(UserListQuery::from(params))
            .await
        {
            Ok(page) => HttpResponse::Ok().json(ApiResponse::success(page, "用户列表获取成功")),
            Err(e) => internal_error("获取用户列表失败", e),
        },
    )
}
