//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub language_id: i64,
    pub level: String,
    pub instructor_id: i64,
    pub status: String,
    pub thumbnail_url: Option<String>,
    pub estimated_minutes: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::languages::Entity",
        from = "Column::LanguageId",
        to = "super::languages::Column::Id"
    )]
    Language,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::InstructorId",
        to = "super::users::Column::Id"
    )]
    Instructor,
}

impl Related<super::languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Language.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::common::ProficiencyLevel;
        use crate::models::courses::entities::{Course, CourseStatus};

        Course {
            id: self.id,
            title: self.title,
            description: self.description,
            language_id: self.language_id,
            level: self.level.parse().unwrap_or(ProficiencyLevel::Beginner),
            instructor_id: self.instructor_id,
            status: self.status.parse().unwrap_or(CourseStatus::Draft),
            thumbnail_url: self.thumbnail_url,
            estimated_minutes: self.estimated_minutes,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
