//! 测验实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub level: String,
    pub time_limit: i32,
    #[sea_orm(column_type = "Double")]
    pub passing_score: f64,
    pub allow_retake: bool,
    pub max_retakes: i32,
    pub randomize_question_order: bool,
    pub show_answers_after_submission: bool,
    pub status: String,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_quiz(self) -> crate::models::quizzes::entities::Quiz {
        use crate::models::common::ProficiencyLevel;
        use crate::models::quizzes::entities::{Quiz, QuizStatus};

        Quiz {
            id: self.id,
            title: self.title,
            description: self.description,
            course_id: self.course_id,
            language_id: self.language_id,
            level: self.level.parse().unwrap_or(ProficiencyLevel::Beginner),
            time_limit: self.time_limit,
            passing_score: self.passing_score,
            allow_retake: self.allow_retake,
            max_retakes: self.max_retakes,
            randomize_question_order: self.randomize_question_order,
            show_answers_after_submission: self.show_answers_after_submission,
            status: self.status.parse().unwrap_or(QuizStatus::Draft),
            created_by: self.created_by,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
