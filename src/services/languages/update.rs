use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LanguageService, normalize_code};
use crate::models::languages::requests::UpdateLanguageRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, conflict, internal_error, not_found};
use crate::utils::validate::validate_required_text;

pub async fn update_language(
    service: &LanguageService,
    request: &HttpRequest,
    language_id: i64,
    mut req: UpdateLanguageRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(ref code) = req.code {
        let code = match normalize_code(code) {
            Ok(code) => code,
            Err(msg) => return Ok(bad_request(ErrorCode::LanguageValidationFailed, msg)),
        };
        // 代码被其他语言占用
        match storage.get_language_by_code(&code).await {
            Ok(Some(existing)) if existing.id != language_id => {
                return Ok(conflict(
                    ErrorCode::LanguageCodeAlreadyExists,
                    format!("语言代码 '{code}' 已存在"),
                ));
            }
            Ok(_) => {}
            Err(e) => return Ok(internal_error("查询语言失败", e)),
        }
        req.code = Some(code);
    }
    if let Some(ref name) = req.name {
        match validate_required_text("Name", name, 100) {
            Ok(name) => req.name = Some(name),
            Err(msg) => return Ok(bad_request(ErrorCode::LanguageValidationFailed, msg)),
        }
    }

    match storage.update_language(language_id, req).await {
        Ok(Some(language)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(language, "语言更新成功")))
        }
        Ok(None) => Ok(not_found(ErrorCode::LanguageNotFound, "语言不存在")),
        Err(e) => Ok(internal_error("更新语言失败", e)),
    }
}
