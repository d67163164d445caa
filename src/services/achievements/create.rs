use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AchievementService, validate_points};
use crate::models::achievements::requests::CreateAchievementRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, internal_error};
use crate::utils::validate::validate_required_text;

pub async fn create_achievement(
    service: &AchievementService,
    request: &HttpRequest,
    mut req: CreateAchievementRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    req.name = match validate_required_text("Name", &req.name, 100) {
        Ok(name) => name,
        Err(msg) => return Ok(bad_request(ErrorCode::AchievementValidationFailed, msg)),
    };
    if let Err(msg) = validate_points(req.points) {
        return Ok(bad_request(ErrorCode::AchievementValidationFailed, msg));
    }

    match storage.create_achievement(req).await {
        Ok(achievement) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(achievement, "成就创建成功")))
        }
        Err(e) => Ok(internal_error("创建成就失败", e)),
    }
}
