use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::models::ApiResponse;
use crate::models::quizzes::{
    entities::QuizStatus,
    requests::{QuizListParams, QuizListQuery},
};
use crate::services::{current_user, internal_error};

pub async fn list_quizzes(
    service: &QuizService,
    request: &HttpRequest,
    query: QuizListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (page, size) = query.pagination.normalized();
    // 学员只能看到已发布的测验
    let status = if user.role.can_author() {
        query.status
    } else {
        Some(QuizStatus::Published)
    };

    let list_query = QuizListQuery {
        page,
        size,
        course_id: query.course_id,
        language_id: query.language_id,
        level: query.level,
        status,
        search: query.search,
    };

    match storage.list_quizzes_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(internal_error("查询测验列表失败", e)),
    }
}
