pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::languages::requests::{
    CreateLanguageRequest, LanguageListParams, UpdateLanguageRequest,
};
use crate::storage::Storage;

pub struct LanguageService {
    storage: Option<Arc<dyn Storage>>,
}

impl LanguageService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_languages(
        &self,
        request: &HttpRequest,
        query: LanguageListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_languages(self, request, query).await
    }

    pub async fn create_language(
        &self,
        request: &HttpRequest,
        req: CreateLanguageRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_language(self, request, req).await
    }

    pub async fn update_language(
        &self,
        request: &HttpRequest,
        language_id: i64,
        req: UpdateLanguageRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_language(self, request, language_id, req).await
    }

    pub async fn delete_language(
        &self,
        request: &HttpRequest,
        language_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_language(self, request, language_id).await
    }
}

/// 语言代码统一为小写后校验
pub(crate) fn normalize_code(code: &str) -> Result<String, &'static str> {
    let code = code.trim().to_lowercase();
    crate::utils::validate::validate_language_code(&code)?;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" ES ").unwrap(), "es");
        assert_eq!(normalize_code("pt-BR").unwrap(), "pt-br");
        assert!(normalize_code("spanish").is_err());
        assert!(normalize_code("").is_err());
    }
}
