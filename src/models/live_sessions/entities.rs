use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    pub enum LiveSessionStatus("../frontend/src/types/generated/live_session.ts") {
        Scheduled => "scheduled",
        Live => "live",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl LiveSessionStatus {
    /// 允许的状态流转：scheduled -> live | cancelled，live -> completed
    pub fn can_transition_to(&self, next: LiveSessionStatus) -> bool {
        matches!(
            (self, next),
            (LiveSessionStatus::Scheduled, LiveSessionStatus::Live)
                | (LiveSessionStatus::Scheduled, LiveSessionStatus::Cancelled)
                | (LiveSessionStatus::Live, LiveSessionStatus::Completed)
        )
    }

    /// 已结束或已取消的直播不再接受报名
    pub fn accepts_registration(&self) -> bool {
        matches!(self, LiveSessionStatus::Scheduled | LiveSessionStatus::Live)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_session.ts")]
pub struct LiveSession {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub host_id: i64,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub meeting_url: Option<String>,
    /// 0 表示不限人数
    pub max_participants: i32,
    pub status: LiveSessionStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl LiveSession {
    pub fn is_full(&self, attendee_count: i64) -> bool {
        self.max_participants > 0 && attendee_count >= self.max_participants as i64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_session.ts")]
pub struct LiveSessionAttendee {
    pub id: i64,
    pub session_id: i64,
    pub user_id: i64,
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use LiveSessionStatus::*;
        assert!(Scheduled.can_transition_to(Live));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(Live.can_transition_to(Completed));
        assert!(!Scheduled.can_transition_to(Completed));
        assert!(!Live.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Live));
        assert!(!Cancelled.can_transition_to(Scheduled));
        assert!(!Live.can_transition_to(Live));
    }

    #[test]
    fn test_capacity() {
        let now = chrono::Utc::now();
        let mut session = LiveSession {
            id: 1,
            title: "Conversación".to_string(),
            description: None,
            course_id: None,
            language_id: None,
            host_id: 2,
            scheduled_at: now,
            duration_minutes: 60,
            meeting_url: None,
            max_participants: 0,
            status: LiveSessionStatus::Scheduled,
            created_at: now,
            updated_at: now,
        };
        assert!(!session.is_full(1_000));
        session.max_participants = 3;
        assert!(!session.is_full(2));
        assert!(session.is_full(3));
    }
}
