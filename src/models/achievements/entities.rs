use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/achievement.ts")]
pub struct Achievement {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: Option<String>,
    pub points: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 用户获得的成就
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/achievement.ts")]
pub struct UserAchievement {
    pub id: i64,
    pub user_id: i64,
    pub achievement: Achievement,
    pub awarded_by: Option<i64>,
    pub awarded_at: chrono::DateTime<chrono::Utc>,
}
