use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AchievementService;
use crate::models::ApiResponse;
use crate::models::achievements::responses::AchievementListResponse;
use crate::services::internal_error;

pub async fn list_achievements(
    service: &AchievementService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_achievements().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AchievementListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(internal_error("查询成就列表失败", e)),
    }
}
