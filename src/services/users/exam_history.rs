use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::responses::ExamHistoryResponse};
use crate::services::{internal_error, not_found};

/// 已通过测验的考试记录，最近的在前
pub async fn list_exam_history(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_by_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "用户不存在")),
        Err(e) => return Ok(internal_error("获取用户信息失败", e)),
    }

    Ok(match storage.list_exam_history(user_id).await {
        Ok(items) => HttpResponse::Ok().json(ApiResponse::success(
            ExamHistoryResponse { items },
            "考试记录获取成功",
        )),
        Err(e) => internal_error("获取考试记录失败", e),
    })
}
