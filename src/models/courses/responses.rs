use serde::Serialize;
use ts_rs::TS;

use super::entities::{Course, Enrollment};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetailResponse {
    pub course: Course,
    pub enrollment_count: i64,
    /// 当前用户的选课记录
    pub enrollment: Option<Enrollment>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct EnrolledCourse {
    pub course: Course,
    pub enrollment: Enrollment,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct EnrolledCourseListResponse {
    pub items: Vec<EnrolledCourse>,
}
