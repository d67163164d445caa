use serde::Serialize;
use ts_rs::TS;

use super::entities::{Achievement, UserAchievement};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/achievement.ts")]
pub struct AchievementListResponse {
    pub items: Vec<Achievement>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/achievement.ts")]
pub struct UserAchievementListResponse {
    pub items: Vec<UserAchievement>,
    pub total_points: i64,
}
