//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间字段统一存储为 Unix 秒。

pub mod prelude;

pub mod achievements;
pub mod course_enrollments;
pub mod courses;
pub mod exam_history;
pub mod languages;
pub mod live_session_attendees;
pub mod live_sessions;
pub mod quiz_attempts;
pub mod quiz_questions;
pub mod quizzes;
pub mod study_sessions;
pub mod user_achievements;
pub mod users;

use chrono::{DateTime, Utc};

/// Unix 秒转为 UTC 时间
pub(crate) fn from_timestamp(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
