//! 学习时长实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "study_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub started_at: i64,
    pub ended_at: Option<i64>,
    pub duration_seconds: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_study_session(self) -> crate::models::study_sessions::entities::StudySession {
        crate::models::study_sessions::entities::StudySession {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            language_id: self.language_id,
            started_at: super::from_timestamp(self.started_at),
            ended_at: self.ended_at.map(super::from_timestamp),
            duration_seconds: self.duration_seconds,
            notes: self.notes,
        }
    }
}
