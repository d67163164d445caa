use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AchievementService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn delete_achievement(
    service: &AchievementService,
    request: &HttpRequest,
    achievement_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_achievement(achievement_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("成就已删除"))),
        Ok(false) => Ok(not_found(ErrorCode::AchievementNotFound, "成就不存在")),
        Err(e) => Ok(internal_error("删除成就失败", e)),
    }
}
