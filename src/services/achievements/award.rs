use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AchievementService;
use crate::models::achievements::{
    entities::UserAchievement, requests::AwardAchievementRequest,
    responses::UserAchievementListResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{conflict, current_user, internal_error, not_found};

/// 颁发成就，同一成就只能获得一次
pub async fn award_achievement(
    service: &AchievementService,
    request: &HttpRequest,
    achievement_id: i64,
    req: AwardAchievementRequest,
) -> ActixResult<HttpResponse> {
    let awarder = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_user_by_id(req.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "用户不存在")),
        Err(e) => return Ok(internal_error("查询用户失败", e)),
    }
    match storage.get_achievement_by_id(achievement_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::AchievementNotFound, "成就不存在")),
        Err(e) => return Ok(internal_error("查询成就失败", e)),
    }
    match storage.has_user_achievement(req.user_id, achievement_id).await {
        Ok(true) => {
            return Ok(conflict(
                ErrorCode::AchievementAlreadyAwarded,
                "该用户已获得此成就",
            ));
        }
        Ok(false) => {}
        Err(e) => return Ok(internal_error("查询用户成就失败", e)),
    }

    match storage
        .award_achievement(req.user_id, achievement_id, Some(awarder.id))
        .await
    {
        Ok(awarded) => {
            info!(
                "User {} awarded achievement {} to user {}",
                awarder.id, achievement_id, req.user_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(awarded, "成就颁发成功")))
        }
        Err(e) => Ok(internal_error("颁发成就失败", e)),
    }
}

/// 用户已获得的成就及总积分
pub async fn list_user_achievements(
    service: &AchievementService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_by_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "用户不存在")),
        Err(e) => return Ok(internal_error("查询用户失败", e)),
    }

    match storage.list_user_achievements(user_id).await {
        Ok(items) => {
            let total_points = total_points(&items);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserAchievementListResponse {
                    items,
                    total_points,
                },
                "查询成功",
            )))
        }
        Err(e) => Ok(internal_error("查询用户成就失败", e)),
    }
}

fn total_points(items: &[UserAchievement]) -> i64 {
    items
        .iter()
        .map(|ua| i64::from(ua.achievement.points))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::achievements::entities::Achievement;

    fn awarded(points: i32) -> UserAchievement {
        let now = chrono::Utc::now();
        UserAchievement {
            id: 1,
            user_id: 1,
            achievement: Achievement {
                id: 1,
                name: "First steps".to_string(),
                description: None,
                icon_url: None,
                category: Some("milestone".to_string()),
                points,
                created_at: now,
                updated_at: now,
            },
            awarded_by: None,
            awarded_at: now,
        }
    }

    #[test]
    fn test_total_points() {
        assert_eq!(total_points(&[]), 0);
        assert_eq!(total_points(&[awarded(10), awarded(25)]), 35);
    }
}
