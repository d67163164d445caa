use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, load_owned_course};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, not_found};

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_course(&storage, course_id, &user).await {
        return Ok(resp);
    }

    match storage.delete_course(course_id).await {
        Ok(true) => {
            info!("User {} deleted course {}", user.id, course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("课程已删除")))
        }
        Ok(false) => Ok(not_found(ErrorCode::CourseNotFound, "课程不存在")),
        Err(e) => Ok(internal_error("删除课程失败", e)),
    }
}
