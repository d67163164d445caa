//! 用户成就实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_achievements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub achievement_id: i64,
    pub awarded_by: Option<i64>,
    pub awarded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::achievements::Entity",
        from = "Column::AchievementId",
        to = "super::achievements::Column::Id"
    )]
    Achievement,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::achievements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Achievement.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_user_achievement(
        self,
        achievement: crate::models::achievements::entities::Achievement,
    ) -> crate::models::achievements::entities::UserAchievement {
        crate::models::achievements::entities::UserAchievement {
            id: self.id,
            user_id: self.user_id,
            achievement,
            awarded_by: self.awarded_by,
            awarded_at: super::from_timestamp(self.awarded_at),
        }
    }
}
