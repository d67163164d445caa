use serde::Deserialize;
use ts_rs::TS;

use super::entities::LiveSessionStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::{deserialize_optional_bool, deserialize_optional_i64};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_session.ts")]
pub struct CreateLiveSessionRequest {
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: Option<i32>,
    pub meeting_url: Option<String>,
    pub max_participants: Option<i32>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_session.ts")]
pub struct UpdateLiveSessionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub duration_minutes: Option<i32>,
    pub meeting_url: Option<String>,
    pub max_participants: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_session.ts")]
pub struct LiveSessionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course_id: Option<i64>,
    pub status: Option<LiveSessionStatus>,
    /// 仅列出尚未开始的直播
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub upcoming: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct LiveSessionListQuery {
    pub page: u64,
    pub size: u64,
    pub course_id: Option<i64>,
    pub status: Option<LiveSessionStatus>,
    pub scheduled_after: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_session.ts")]
pub struct UpdateLiveSessionStatusRequest {
    pub status: LiveSessionStatus,
}
