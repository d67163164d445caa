use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::ApiResponse;
use crate::models::courses::{
    entities::CourseStatus,
    requests::{CourseListParams, CourseListQuery},
};
use crate::services::{current_user, internal_error};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (page, size) = query.pagination.normalized();
    let can_author = user.role.can_author();

    // mine=true 仅对讲师与管理员生效
    let instructor_id = if can_author && query.mine.unwrap_or(false) {
        Some(user.id)
    } else {
        query.instructor_id
    };
    let status = if can_author {
        query.status
    } else {
        Some(CourseStatus::Published)
    };

    let list_query = CourseListQuery {
        page,
        size,
        language_id: query.language_id,
        level: query.level,
        instructor_id,
        status,
        search: query.search,
    };

    match storage.list_courses_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(internal_error("查询课程列表失败", e)),
    }
}
