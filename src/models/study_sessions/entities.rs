use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学习时长记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study_session.ts")]
pub struct StudySession {
    pub id: i64,
    pub user_id: i64,
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
    /// 结束时由服务端计算
    pub duration_seconds: Option<i64>,
    pub notes: Option<String>,
}

impl StudySession {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}
