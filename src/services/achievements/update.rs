use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AchievementService, validate_points};
use crate::models::achievements::requests::UpdateAchievementRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, internal_error, not_found};
use crate::utils::validate::validate_required_text;

pub async fn update_achievement(
    service: &AchievementService,
    request: &HttpRequest,
    achievement_id: i64,
    mut req: UpdateAchievementRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(ref name) = req.name {
        match validate_required_text("Name", name, 100) {
            Ok(name) => req.name = Some(name),
            Err(msg) => return Ok(bad_request(ErrorCode::AchievementValidationFailed, msg)),
        }
    }
    if let Err(msg) = validate_points(req.points) {
        return Ok(bad_request(ErrorCode::AchievementValidationFailed, msg));
    }

    match storage.update_achievement(achievement_id, req).await {
        Ok(Some(achievement)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(achievement, "成就更新成功")))
        }
        Ok(None) => Ok(not_found(ErrorCode::AchievementNotFound, "成就不存在")),
        Err(e) => Ok(internal_error("更新成就失败", e)),
    }
}
