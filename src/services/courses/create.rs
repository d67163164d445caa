use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, check_language_exists};
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error};
use crate::utils::validate::validate_required_text;

/// 创建课程，创建者即授课讲师
pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut req: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    req.title = match validate_required_text("Title", &req.title, 200) {
        Ok(title) => title,
        Err(msg) => return Ok(bad_request(ErrorCode::CourseValidationFailed, msg)),
    };
    if req.estimated_minutes.is_some_and(|m| m < 0) {
        return Ok(bad_request(
            ErrorCode::CourseValidationFailed,
            "Estimated minutes cannot be negative",
        ));
    }
    if let Err(resp) = check_language_exists(&storage, req.language_id).await {
        return Ok(resp);
    }

    match storage.create_course(user.id, req).await {
        Ok(course) => {
            info!("User {} created course {} ({})", user.id, course.id, course.title);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "课程创建成功")))
        }
        Err(e) => Ok(internal_error("创建课程失败", e)),
    }
}
