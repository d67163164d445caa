//! 测验题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub question_type: String,
    /// JSON 数组：[{id, text, is_correct}]
    #[sea_orm(column_type = "Text")]
    pub options: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub correct_answer: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub explanation: Option<String>,
    pub difficulty: String,
    pub points: i32,
    pub position: i32,
    pub media_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quizzes::Entity",
        from = "Column::QuizId",
        to = "super::quizzes::Column::Id"
    )]
    Quiz,
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_question(self) -> crate::models::quizzes::entities::Question {
        use crate::models::quizzes::entities::{
            Question, QuestionDifficulty, QuestionOption, QuestionType,
        };

        let options = serde_json::from_str::<Vec<QuestionOption>>(&self.options).unwrap_or_else(|e| {
            tracing::warn!("Malformed options JSON for question {}: {}", self.id, e);
            Vec::new()
        });

        Question {
            id: self.id,
            quiz_id: self.quiz_id,
            text: self.text,
            question_type: self
                .question_type
                .parse()
                .unwrap_or(QuestionType::MultipleChoice),
            options,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
            difficulty: self.difficulty.parse().unwrap_or(QuestionDifficulty::Medium),
            points: self.points,
            position: self.position,
            media_url: self.media_url,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
