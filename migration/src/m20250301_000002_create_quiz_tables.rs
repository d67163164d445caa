use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_tables::{Courses, Languages, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建测验表
        manager
            .create_table(
                Table::create()
                    .table(Quizzes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quizzes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Quizzes::Title).string().not_null())
                    .col(ColumnDef::new(Quizzes::Description).text().null())
                    .col(ColumnDef::new(Quizzes::CourseId).big_integer().null())
                    .col(ColumnDef::new(Quizzes::LanguageId).big_integer().null())
                    .col(ColumnDef::new(Quizzes::Level).string().not_null())
                    .col(
                        ColumnDef::new(Quizzes::TimeLimit)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Quizzes::PassingScore).double().not_null())
                    .col(
                        ColumnDef::new(Quizzes::AllowRetake)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Quizzes::MaxRetakes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Quizzes::RandomizeQuestionOrder)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Quizzes::ShowAnswersAfterSubmission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Quizzes::Status).string().not_null())
                    .col(ColumnDef::new(Quizzes::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Quizzes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Quizzes::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Quizzes::Table, Quizzes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Quizzes::Table, Quizzes::LanguageId)
                            .to(Languages::Table, Languages::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Quizzes::Table, Quizzes::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目表，选项以 JSON 文本存储
        manager
            .create_table(
                Table::create()
                    .table(QuizQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizQuestions::QuizId).big_integer().not_null())
                    .col(ColumnDef::new(QuizQuestions::Text).text().not_null())
                    .col(ColumnDef::new(QuizQuestions::QuestionType).string().not_null())
                    .col(ColumnDef::new(QuizQuestions::Options).text().not_null())
                    .col(ColumnDef::new(QuizQuestions::CorrectAnswer).text().null())
                    .col(ColumnDef::new(QuizQuestions::Explanation).text().null())
                    .col(ColumnDef::new(QuizQuestions::Difficulty).string().not_null())
                    .col(
                        ColumnDef::new(QuizQuestions::Points)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(QuizQuestions::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(QuizQuestions::MediaUrl).string().null())
                    .col(
                        ColumnDef::new(QuizQuestions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuizQuestions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuizQuestions::Table, QuizQuestions::QuizId)
                            .to(Quizzes::Table, Quizzes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作答记录表
        manager
            .create_table(
                Table::create()
                    .table(QuizAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizAttempts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizAttempts::QuizId).big_integer().not_null())
                    .col(ColumnDef::new(QuizAttempts::UserId).big_integer().not_null())
                    .col(ColumnDef::new(QuizAttempts::Answers).text().not_null())
                    .col(
                        ColumnDef::new(QuizAttempts::StartedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuizAttempts::CompletedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuizAttempts::EarnedPoints)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuizAttempts::TotalPoints)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuizAttempts::Score).double().not_null())
                    .col(ColumnDef::new(QuizAttempts::Passed).boolean().not_null())
                    .col(
                        ColumnDef::new(QuizAttempts::AttemptNumber)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuizAttempts::Table, QuizAttempts::QuizId)
                            .to(Quizzes::Table, Quizzes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuizAttempts::Table, QuizAttempts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考试记录表
        manager
            .create_table(
                Table::create()
                    .table(ExamHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamHistory::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ExamHistory::QuizId).big_integer().not_null())
                    .col(ColumnDef::new(ExamHistory::QuizTitle).string().not_null())
                    .col(ColumnDef::new(ExamHistory::AttemptId).big_integer().not_null())
                    .col(ColumnDef::new(ExamHistory::Score).double().not_null())
                    .col(ColumnDef::new(ExamHistory::PassedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamHistory::Table, ExamHistory::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamHistory::Table, ExamHistory::QuizId)
                            .to(Quizzes::Table, Quizzes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamHistory::Table, ExamHistory::AttemptId)
                            .to(QuizAttempts::Table, QuizAttempts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_quizzes_course_id")
                    .table(Quizzes::Table)
                    .col(Quizzes::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_quiz_questions_quiz_id")
                    .table(QuizQuestions::Table)
                    .col(QuizQuestions::QuizId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_quiz_attempts_quiz_user_number")
                    .table(QuizAttempts::Table)
                    .col(QuizAttempts::QuizId)
                    .col(QuizAttempts::UserId)
                    .col(QuizAttempts::AttemptNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_history_user_id")
                    .table(ExamHistory::Table)
                    .col(ExamHistory::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExamHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuizAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuizQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quizzes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Quizzes {
    #[sea_orm(iden = "quizzes")]
    Table,
    Id,
    Title,
    Description,
    CourseId,
    LanguageId,
    Level,
    TimeLimit,
    PassingScore,
    AllowRetake,
    MaxRetakes,
    RandomizeQuestionOrder,
    ShowAnswersAfterSubmission,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QuizQuestions {
    #[sea_orm(iden = "quiz_questions")]
    Table,
    Id,
    QuizId,
    Text,
    QuestionType,
    Options,
    CorrectAnswer,
    Explanation,
    Difficulty,
    Points,
    Position,
    MediaUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QuizAttempts {
    #[sea_orm(iden = "quiz_attempts")]
    Table,
    Id,
    QuizId,
    UserId,
    Answers,
    StartedAt,
    CompletedAt,
    EarnedPoints,
    TotalPoints,
    Score,
    Passed,
    AttemptNumber,
}

#[derive(DeriveIden)]
enum ExamHistory {
    #[sea_orm(iden = "exam_history")]
    Table,
    Id,
    UserId,
    QuizId,
    QuizTitle,
    AttemptId,
    Score,
    PassedAt,
}
