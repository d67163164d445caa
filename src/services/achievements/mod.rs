pub mod award;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::achievements::requests::{
    AwardAchievementRequest, CreateAchievementRequest, UpdateAchievementRequest,
};
use crate::storage::Storage;

pub struct AchievementService {
    storage: Option<Arc<dyn Storage>>,
}

impl AchievementService {
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

    pub async fn list_achievements(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_achievements(self, request).await
    }

    pub async fn create_achievement(
        &self,
        request: &HttpRequest,
        req: CreateAchievementRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_achievement(self, request, req).await
    }

    pub async fn update_achievement(
        &self,
        request: &HttpRequest,
        achievement_id: i64,
        req: UpdateAchievementRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_achievement(self, request, achievement_id, req).await
    }

    pub async fn delete_achievement(
        &self,
        request: &HttpRequest,
        achievement_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_achievement(self, request, achievement_id).await
    }

    pub async fn award_achievement(
        &self,
        request: &HttpRequest,
        achievement_id: i64,
        req: AwardAchievementRequest,
    ) -> ActixResult<HttpResponse> {
        award::award_achievement(self, request, achievement_id, req).await
    }

    pub async fn list_user_achievements(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        award::list_user_achievements(self, request, user_id).await
    }
}

pub(crate) fn validate_points(points: Option<i32>) -> Result<(), &'static str> {
    if points.is_some_and(|p| p < 0) {
        return Err("Points cannot be negative");
    }
    Ok(())
}
