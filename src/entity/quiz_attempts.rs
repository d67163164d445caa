//! 测验作答记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub user_id: i64,
    /// JSON 数组：[{question_id, user_answer, is_correct, points_earned}]
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    pub started_at: i64,
    pub completed_at: i64,
    pub earned_points: i64,
    pub total_points: i64,
    #[sea_orm(column_type = "Double")]
    pub score: f64,
    pub passed: bool,
    pub attempt_number: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quizzes::Entity",
        from = "Column::QuizId",
        to = "super::quizzes::Column::Id"
    )]
    Quiz,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attempt(self) -> crate::models::quizzes::entities::QuizAttempt {
        use crate::models::quizzes::entities::{AttemptAnswer, QuizAttempt};

        let answers = serde_json::from_str::<Vec<AttemptAnswer>>(&self.answers).unwrap_or_else(|e| {
            tracing::warn!("Malformed answers JSON for attempt {}: {}", self.id, e);
            Vec::new()
        });

        QuizAttempt {
            id: self.id,
            quiz_id: self.quiz_id,
            user_id: self.user_id,
            answers,
            started_at: super::from_timestamp(self.started_at),
            completed_at: super::from_timestamp(self.completed_at),
            earned_points: self.earned_points,
            total_points: self.total_points,
            score: self.score,
            passed: self.passed,
            attempt_number: self.attempt_number,
        }
    }
}
