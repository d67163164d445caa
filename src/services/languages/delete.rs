use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LanguageService;
use crate::models::courses::requests::CourseListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{conflict, internal_error, not_found};

/// 仍有课程使用的语言不能删除
pub async fn delete_language(
    service: &LanguageService,
    request: &HttpRequest,
    language_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let in_use = CourseListQuery {
        page: 1,
        size: 1,
        language_id: Some(language_id),
        ..Default::default()
    };
    match storage.list_courses_with_pagination(in_use).await {
        Ok(courses) if courses.pagination.total > 0 => {
            return Ok(conflict(
                ErrorCode::Conflict,
                "该语言下仍有课程，请先删除或迁移课程，或将语言停用",
            ));
        }
        Ok(_) => {}
        Err(e) => return Ok(internal_error("查询课程失败", e)),
    }

    match storage.delete_language(language_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("语言已删除"))),
        Ok(false) => Ok(not_found(ErrorCode::LanguageNotFound, "语言不存在")),
        Err(e) => Ok(internal_error("删除语言失败", e)),
    }
}
