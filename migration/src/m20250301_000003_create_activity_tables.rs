use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_tables::{Courses, Languages, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建直播课表
        manager
            .create_table(
                Table::create()
                    .table(LiveSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LiveSessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LiveSessions::Title).string().not_null())
                    .col(ColumnDef::new(LiveSessions::Description).text().null())
                    .col(ColumnDef::new(LiveSessions::CourseId).big_integer().null())
                    .col(ColumnDef::new(LiveSessions::LanguageId).big_integer().null())
                    .col(ColumnDef::new(LiveSessions::HostId).big_integer().not_null())
                    .col(
                        ColumnDef::new(LiveSessions::ScheduledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LiveSessions::DurationMinutes)
                            .integer()
                            .not_null()
                            .default(60),
                    )
                    .col(ColumnDef::new(LiveSessions::MeetingUrl).string().null())
                    .col(
                        ColumnDef::new(LiveSessions::MaxParticipants)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(LiveSessions::Status).string().not_null())
                    .col(
                        ColumnDef::new(LiveSessions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LiveSessions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LiveSessions::Table, LiveSessions::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LiveSessions::Table, LiveSessions::LanguageId)
                            .to(Languages::Table, Languages::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LiveSessions::Table, LiveSessions::HostId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建直播报名表
        manager
            .create_table(
                Table::create()
                    .table(LiveSessionAttendees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LiveSessionAttendees::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LiveSessionAttendees::SessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LiveSessionAttendees::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LiveSessionAttendees::RegisteredAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LiveSessionAttendees::Table, LiveSessionAttendees::SessionId)
                            .to(LiveSessions::Table, LiveSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LiveSessionAttendees::Table, LiveSessionAttendees::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成就表
        manager
            .create_table(
                Table::create()
                    .table(Achievements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Achievements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Achievements::Name).string().not_null())
                    .col(ColumnDef::new(Achievements::Description).text().null())
                    .col(ColumnDef::new(Achievements::IconUrl).string().null())
                    .col(ColumnDef::new(Achievements::Category).string().null())
                    .col(
                        ColumnDef::new(Achievements::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Achievements::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Achievements::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建用户成就表
        manager
            .create_table(
                Table::create()
                    .table(UserAchievements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserAchievements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserAchievements::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserAchievements::AchievementId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserAchievements::AwardedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserAchievements::AwardedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserAchievements::Table, UserAchievements::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserAchievements::Table, UserAchievements::AchievementId)
                            .to(Achievements::Table, Achievements::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学习时长表
        manager
            .create_table(
                Table::create()
                    .table(StudySessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudySessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudySessions::UserId).big_integer().not_null())
                    .col(ColumnDef::new(StudySessions::CourseId).big_integer().null())
                    .col(ColumnDef::new(StudySessions::LanguageId).big_integer().null())
                    .col(
                        ColumnDef::new(StudySessions::StartedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudySessions::EndedAt).big_integer().null())
                    .col(
                        ColumnDef::new(StudySessions::DurationSeconds)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(StudySessions::Notes).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudySessions::Table, StudySessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudySessions::Table, StudySessions::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudySessions::Table, StudySessions::LanguageId)
                            .to(Languages::Table, Languages::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_live_sessions_scheduled_at")
                    .table(LiveSessions::Table)
                    .col(LiveSessions::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_live_session_attendees_session_user")
                    .table(LiveSessionAttendees::Table)
                    .col(LiveSessionAttendees::SessionId)
                    .col(LiveSessionAttendees::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_achievements_user_achievement")
                    .table(UserAchievements::Table)
                    .col(UserAchievements::UserId)
                    .col(UserAchievements::AchievementId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_study_sessions_user_started")
                    .table(StudySessions::Table)
                    .col(StudySessions::UserId)
                    .col(StudySessions::StartedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudySessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserAchievements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Achievements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LiveSessionAttendees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LiveSessions::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum LiveSessions {
    #[sea_orm(iden = "live_sessions")]
    Table,
    Id,
    Title,
    Description,
    CourseId,
    LanguageId,
    HostId,
    ScheduledAt,
    DurationMinutes,
    MeetingUrl,
    MaxParticipants,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LiveSessionAttendees {
    #[sea_orm(iden = "live_session_attendees")]
    Table,
    Id,
    SessionId,
    UserId,
    RegisteredAt,
}

#[derive(DeriveIden)]
enum Achievements {
    #[sea_orm(iden = "achievements")]
    Table,
    Id,
    Name,
    Description,
    IconUrl,
    Category,
    Points,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserAchievements {
    #[sea_orm(iden = "user_achievements")]
    Table,
    Id,
    UserId,
    AchievementId,
    AwardedBy,
    AwardedAt,
}

#[derive(DeriveIden)]
enum StudySessions {
    #[sea_orm(iden = "study_sessions")]
    Table,
    Id,
    UserId,
    CourseId,
    LanguageId,
    StartedAt,
    EndedAt,
    DurationSeconds,
    Notes,
}
