use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{LanguageService, normalize_code};
use crate::models::languages::requests::CreateLanguageRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, conflict, internal_error};
use crate::utils::validate::validate_required_text;

pub async fn create_language(
    service: &LanguageService,
    request: &HttpRequest,
    mut req: CreateLanguageRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    req.code = match normalize_code(&req.code) {
        Ok(code) => code,
        Err(msg) => return Ok(bad_request(ErrorCode::LanguageValidationFailed, msg)),
    };
    req.name = match validate_required_text("Name", &req.name, 100) {
        Ok(name) => name,
        Err(msg) => return Ok(bad_request(ErrorCode::LanguageValidationFailed, msg)),
    };

    match storage.get_language_by_code(&req.code).await {
        Ok(Some(_)) => {
            return Ok(conflict(
                ErrorCode::LanguageCodeAlreadyExists,
                format!("语言代码 '{}' 已存在", req.code),
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("查询语言失败", e)),
    }

    match storage.create_language(req).await {
        Ok(language) => {
            info!("Language {} ({}) created", language.code, language.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(language, "语言创建成功")))
        }
        Err(e) => Ok(internal_error("创建语言失败", e)),
    }
}
