//! 考试记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,
    pub quiz_title: String,
    pub attempt_id: i64,
    #[sea_orm(column_type = "Double")]
    pub score: f64,
    pub passed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::quiz_attempts::Entity",
        from = "Column::AttemptId",
        to = "super::quiz_attempts::Column::Id"
    )]
    Attempt,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::quiz_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_entry(self) -> crate::models::quizzes::entities::ExamHistoryEntry {
        crate::models::quizzes::entities::ExamHistoryEntry {
            id: self.id,
            user_id: self.user_id,
            quiz_id: self.quiz_id,
            quiz_title: self.quiz_title,
            attempt_id: self.attempt_id,
            score: self.score,
            passed_at: super::from_timestamp(self.passed_at),
        }
    }
}
