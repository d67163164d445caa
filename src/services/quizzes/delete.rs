use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{QuizService, load_owned_quiz};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, not_found};

pub async fn delete_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_quiz(&storage, quiz_id, &user).await {
        return Ok(resp);
    }

    match storage.delete_quiz(quiz_id).await {
        Ok(true) => {
            info!("User {} deleted quiz {}", user.id, quiz_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("测验已删除")))
        }
        Ok(false) => Ok(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => Ok(internal_error("删除测验失败", e)),
    }
}
