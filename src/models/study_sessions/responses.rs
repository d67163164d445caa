use serde::Serialize;
use ts_rs::TS;

use super::entities::StudySession;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_session.ts")]
pub struct StudySessionListResponse {
    pub items: Vec<StudySession>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_session.ts")]
pub struct DailyStudyTotal {
    pub date: chrono::NaiveDate,
    pub total_seconds: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_session.ts")]
pub struct StudyStatsResponse {
    pub days: i64,
    pub total_seconds: i64,
    pub session_count: i64,
    pub daily: Vec<DailyStudyTotal>,
}
