pub mod achievements;
pub mod auth;
pub mod common;
pub mod courses;
pub mod languages;
pub mod live_sessions;
pub mod quizzes;
pub mod study_sessions;
pub mod system;
pub mod users;

pub use common::{
    ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery, ProficiencyLevel,
};

// 程序启动时间，用于健康检查中的运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
