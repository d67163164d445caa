//! 直播课实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "live_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub host_id: i64,
    pub scheduled_at: i64,
    pub duration_minutes: i32,
    pub meeting_url: Option<String>,
    pub max_participants: i32,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::HostId",
        to = "super::users::Column::Id"
    )]
    Host,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Host.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_live_session(self) -> crate::models::live_sessions::entities::LiveSession {
        use crate::models::live_sessions::entities::{LiveSession, LiveSessionStatus};

        LiveSession {
            id: self.id,
            title: self.title,
            description: self.description,
            course_id: self.course_id,
            language_id: self.language_id,
            host_id: self.host_id,
            scheduled_at: super::from_timestamp(self.scheduled_at),
            duration_minutes: self.duration_minutes,
            meeting_url: self.meeting_url,
            max_participants: self.max_participants,
            status: self.status.parse().unwrap_or(LiveSessionStatus::Scheduled),
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
