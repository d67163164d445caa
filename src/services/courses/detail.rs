use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, can_view, load_course};
use crate::models::courses::responses::CourseDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, not_found};

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let course = match load_course(&storage, course_id).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };
    if !can_view(&course, &user) {
        return Ok(not_found(ErrorCode::CourseNotFound, "课程不存在"));
    }

    let enrollment_count = match storage.count_course_enrollments(course_id).await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error("统计选课人数失败", e)),
    };
    let enrollment = match storage.get_enrollment(course_id, user.id).await {
        Ok(enrollment) => enrollment,
        Err(e) => return Ok(internal_error("查询选课记录失败", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseDetailResponse {
            course,
            enrollment_count,
            enrollment,
        },
        "查询成功",
    )))
}
