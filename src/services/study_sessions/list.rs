use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudySessionService;
use crate::models::ApiResponse;
use crate::models::common::PaginationQuery;
use crate::services::{current_user, internal_error};

pub async fn list_sessions(
    service: &StudySessionService,
    request: &HttpRequest,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (page, size) = query.normalized();
    match storage.list_study_sessions(user.id, page, size).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(internal_error("查询学习记录失败", e)),
    }
}
