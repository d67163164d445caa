use serde::Serialize;
use ts_rs::TS;

use super::entities::{LiveSession, LiveSessionAttendee};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_session.ts")]
pub struct LiveSessionListResponse {
    pub items: Vec<LiveSession>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_session.ts")]
pub struct LiveSessionDetailResponse {
    pub session: LiveSession,
    pub attendee_count: i64,
    pub is_registered: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_session.ts")]
pub struct AttendeeListResponse {
    pub items: Vec<LiveSessionAttendee>,
}
