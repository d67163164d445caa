use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, load_course};
use crate::models::courses::{
    entities::CourseStatus, requests::UpdateProgressRequest,
    responses::EnrolledCourseListResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, conflict, current_user, internal_error, not_found};

/// 只能选修已发布的课程
pub async fn enroll(
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
    if course.status != CourseStatus::Published {
        return Ok(bad_request(ErrorCode::CourseNotPublished, "课程尚未发布"));
    }

    match storage.get_enrollment(course_id, user.id).await {
        Ok(Some(_)) => {
            return Ok(conflict(ErrorCode::CourseAlreadyEnrolled, "已选修该课程"));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("查询选课记录失败", e)),
    }

    match storage.enroll_user(course_id, user.id).await {
        Ok(enrollment) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(enrollment, "选课成功")))
        }
        Err(e) => Ok(internal_error("选课失败", e)),
    }
}

pub async fn unenroll(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.unenroll_user(course_id, user.id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("已退选该课程"))),
        Ok(false) => Ok(not_found(ErrorCode::CourseNotEnrolled, "未选修该课程")),
        Err(e) => Ok(internal_error("退选失败", e)),
    }
}

/// 当前用户已选课程
pub async fn list_enrolled(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.list_user_enrollments(user.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EnrolledCourseListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(internal_error("查询选课列表失败", e)),
    }
}

/// 更新学习进度，达到 100 时记录完成时间
pub async fn update_progress(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    req: UpdateProgressRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if !(0..=100).contains(&req.progress) {
        return Ok(bad_request(
            ErrorCode::CourseValidationFailed,
            "Progress must be between 0 and 100",
        ));
    }

    match storage
        .update_enrollment_progress(course_id, user.id, req.progress)
        .await
    {
        Ok(Some(enrollment)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment, "进度已更新")))
        }
        Ok(None) => Ok(not_found(ErrorCode::CourseNotEnrolled, "未选修该课程")),
        Err(e) => Ok(internal_error("更新进度失败", e)),
    }
}
