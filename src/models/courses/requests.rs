use serde::Deserialize;
use ts_rs::TS;

use super::entities::CourseStatus;
use crate::models::common::pagination::{deserialize_optional_bool, deserialize_optional_i64};
use crate::models::common::{PaginationQuery, ProficiencyLevel};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub language_id: i64,
    pub level: Option<ProficiencyLevel>,
    pub status: Option<CourseStatus>,
    pub thumbnail_url: Option<String>,
    pub estimated_minutes: Option<i32>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub language_id: Option<i64>,
    pub level: Option<ProficiencyLevel>,
    pub status: Option<CourseStatus>,
    pub thumbnail_url: Option<String>,
    pub estimated_minutes: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub language_id: Option<i64>,
    pub level: Option<ProficiencyLevel>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub instructor_id: Option<i64>,
    pub status: Option<CourseStatus>,
    pub search: Option<String>,
    /// 仅列出当前讲师自己的课程
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub mine: Option<bool>,
}

// 存储层查询条件
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: u64,
    pub size: u64,
    pub language_id: Option<i64>,
    pub level: Option<ProficiencyLevel>,
    pub instructor_id: Option<i64>,
    pub status: Option<CourseStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateProgressRequest {
    pub progress: i32,
}
