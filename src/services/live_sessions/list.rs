use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LiveSessionService;
use crate::models::ApiResponse;
use crate::models::live_sessions::requests::{LiveSessionListParams, LiveSessionListQuery};
use crate::services::internal_error;

pub async fn list_sessions(
    service: &LiveSessionService,
    request: &HttpRequest,
    query: LiveSessionListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let (page, size) = query.pagination.normalized();

    let list_query = LiveSessionListQuery {
        page,
        size,
        course_id: query.course_id,
        status: query.status,
        scheduled_after: query
            .upcoming
            .unwrap_or(false)
            .then(chrono::Utc::now),
    };

    match storage.list_live_sessions(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(internal_error("查询直播列表失败", e)),
    }
}
