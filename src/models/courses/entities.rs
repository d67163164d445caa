use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::ProficiencyLevel;

crate::define_string_enum! {
    pub enum CourseStatus("../frontend/src/types/generated/course.ts") {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub language_id: i64,
    pub level: ProficiencyLevel,
    pub instructor_id: i64,
    pub status: CourseStatus,
    pub thumbnail_url: Option<String>,
    /// 预计学习时长（分钟）
    pub estimated_minutes: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.instructor_id == user_id
    }
}

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    /// 0-100
    pub progress: i32,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}
