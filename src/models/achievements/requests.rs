use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/achievement.ts")]
pub struct CreateAchievementRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: Option<String>,
    pub points: Option<i32>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/achievement.ts")]
pub struct UpdateAchievementRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: Option<String>,
    pub points: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/achievement.ts")]
pub struct AwardAchievementRequest {
    pub user_id: i64,
}
