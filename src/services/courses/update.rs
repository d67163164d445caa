use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, check_language_exists, load_owned_course};
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, not_found};
use crate::utils::validate::validate_required_text;

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    mut req: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_course(&storage, course_id, &user).await {
        return Ok(resp);
    }

    if let Some(ref title) = req.title {
        match validate_required_text("Title", title, 200) {
            Ok(title) => req.title = Some(title),
            Err(msg) => return Ok(bad_request(ErrorCode::CourseValidationFailed, msg)),
        }
    }
    if req.estimated_minutes.is_some_and(|m| m < 0) {
        return Ok(bad_request(
            ErrorCode::CourseValidationFailed,
            "Estimated minutes cannot be negative",
        ));
    }
    if let Some(language_id) = req.language_id
        && let Err(resp) = check_language_exists(&storage, language_id).await
    {
        return Ok(resp);
    }

    match storage.update_course(course_id, req).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程更新成功"))),
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "课程不存在")),
        Err(e) => Ok(internal_error("更新课程失败", e)),
    }
}
