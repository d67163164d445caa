use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::deserialize_optional_i64;

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_session.ts")]
pub struct StartStudySessionRequest {
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_session.ts")]
pub struct EndStudySessionRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_session.ts")]
pub struct StudyStatsParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub days: Option<i64>,
}

impl StudyStatsParams {
    pub const DEFAULT_DAYS: i64 = 7;
    pub const MAX_DAYS: i64 = 90;

    /// 统计天数，限制在 1..=90
    pub fn days(&self) -> i64 {
        self.days.unwrap_or(Self::DEFAULT_DAYS).clamp(1, Self::MAX_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_clamped() {
        assert_eq!(StudyStatsParams { days: None }.days(), 7);
        assert_eq!(StudyStatsParams { days: Some(0) }.days(), 1);
        assert_eq!(StudyStatsParams { days: Some(-3) }.days(), 1);
        assert_eq!(StudyStatsParams { days: Some(30) }.days(), 30);
        assert_eq!(StudyStatsParams { days: Some(365) }.days(), 90);
    }
}
