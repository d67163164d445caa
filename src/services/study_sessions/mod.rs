pub mod end;
pub mod list;
pub mod start;
pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::common::PaginationQuery;
use crate::models::study_sessions::requests::{
    EndStudySessionRequest, StartStudySessionRequest, StudyStatsParams,
};
use crate::storage::Storage;

pub struct StudySessionService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudySessionService {
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

    pub async fn start_session(
        &self,
        request: &HttpRequest,
        req: StartStudySessionRequest,
    ) -> ActixResult<HttpResponse> {
        start::start_session(self, request, req).await
    }

    pub async fn end_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
        req: EndStudySessionRequest,
    ) -> ActixResult<HttpResponse> {
        end::end_session(self, request, session_id, req).await
    }

    pub async fn list_sessions(
        &self,
        request: &HttpRequest,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_sessions(self, request, query).await
    }

    pub async fn get_stats(
        &self,
        request: &HttpRequest,
        query: StudyStatsParams,
    ) -> ActixResult<HttpResponse> {
        stats::get_stats(self, request, query).await
    }
}
