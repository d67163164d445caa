use super::SeaOrmStorage;
use crate::entity::exam_history::{
    ActiveModel as ExamHistoryActiveModel, Column as ExamHistoryColumn, Entity as ExamHistory,
};
use crate::entity::quiz_attempts::{ActiveModel, Column, Entity as QuizAttempts};
use crate::errors::{LangLearnError, Result};
use crate::models::{
    PaginationInfo,
    quizzes::{
        entities::{ExamHistoryEntry, NewQuizAttempt, QuizAttempt},
        responses::AttemptListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait,
};

impl SeaOrmStorage {
    /// 写入作答记录；通过时在同一事务内追加考试记录
    ///
    /// 次数须紧接已有记录，否则返回 Conflict
    pub async fn record_attempt_impl(
        &self,
        attempt: NewQuizAttempt,
        quiz_title: &str,
    ) -> Result<QuizAttempt> {
        let answers = serde_json::to_string(&attempt.answers)
            .map_err(|e| LangLearnError::serialization(format!("序列化作答失败: {e}")))?;
        let completed_at = attempt.completed_at.timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("开启事务失败: {e}")))?;

        let prior = QuizAttempts::find()
            .filter(Column::QuizId.eq(attempt.quiz_id))
            .filter(Column::UserId.eq(attempt.user_id))
            .count(&txn)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("统计作答次数失败: {e}")))?;
        if prior + 1 != attempt.attempt_number as u64 {
            return Err(LangLearnError::conflict(format!(
                "作答次数已变化: 期望第 {} 次，实际已有 {} 次",
                attempt.attempt_number, prior
            )));
        }

        let model = ActiveModel {
            quiz_id: Set(attempt.quiz_id),
            user_id: Set(attempt.user_id),
            answers: Set(answers),
            started_at: Set(attempt.started_at.timestamp()),
            completed_at: Set(completed_at),
            earned_points: Set(attempt.earned_points),
            total_points: Set(attempt.total_points),
            score: Set(attempt.score),
            passed: Set(attempt.passed),
            attempt_number: Set(attempt.attempt_number),
            ..Default::default()
        };

        let saved = model.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                LangLearnError::conflict(format!("重复的作答次数: {}", attempt.attempt_number))
            }
            _ => LangLearnError::database_operation(format!("保存作答记录失败: {e}")),
        })?;

        if saved.passed {
            let entry = ExamHistoryActiveModel {
                user_id: Set(saved.user_id),
                quiz_id: Set(saved.quiz_id),
                quiz_title: Set(quiz_title.to_string()),
                attempt_id: Set(saved.id),
                score: Set(saved.score),
                passed_at: Set(completed_at),
                ..Default::default()
            };
            entry
                .insert(&txn)
                .await
                .map_err(|e| LangLearnError::database_operation(format!("保存考试记录失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved.into_attempt())
    }

    pub async fn get_attempt_by_id_impl(&self, attempt_id: i64) -> Result<Option<QuizAttempt>> {
        let result = QuizAttempts::find_by_id(attempt_id)
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询作答记录失败: {e}")))?;

        Ok(result.map(|m| m.into_attempt()))
    }

    pub async fn count_user_attempts_impl(&self, quiz_id: i64, user_id: i64) -> Result<i64> {
        let count = QuizAttempts::find()
            .filter(Column::QuizId.eq(quiz_id))
            .filter(Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("统计作答次数失败: {e}")))?;

        Ok(count as i64)
    }

    /// 用户在某测验的全部作答，按次数升序
    pub async fn list_user_attempts_impl(
        &self,
        quiz_id: i64,
        user_id: i64,
    ) -> Result<Vec<QuizAttempt>> {
        let result = QuizAttempts::find()
            .filter(Column::QuizId.eq(quiz_id))
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::AttemptNumber)
            .all(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询作答记录失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attempt()).collect())
    }

    pub async fn list_quiz_attempts_impl(
        &self,
        quiz_id: i64,
        page: u64,
        size: u64,
    ) -> Result<AttemptListResponse> {
        let page = page.max(1);
        let size = size.clamp(1, 100);

        let paginator = QuizAttempts::find()
            .filter(Column::QuizId.eq(quiz_id))
            .order_by_desc(Column::CompletedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询作答总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询作答页数失败: {e}")))?;
        let attempts = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询作答列表失败: {e}")))?;

        Ok(AttemptListResponse {
            items: attempts.into_iter().map(|m| m.into_attempt()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 考试记录，最近通过的在前
    pub async fn list_exam_history_impl(&self, user_id: i64) -> Result<Vec<ExamHistoryEntry>> {
        let result = ExamHistory::find()
            .filter(ExamHistoryColumn::UserId.eq(user_id))
            .order_by_desc(ExamHistoryColumn::PassedAt)
            .order_by_desc(ExamHistoryColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询考试记录失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_entry()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::requests::CreateQuizRequest;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    async fn memory_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt).await.expect("connect sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        SeaOrmStorage { db }
    }

    /// 返回 (用户 ID, 测验 ID)
    async fn seed_quiz(storage: &SeaOrmStorage) -> (i64, i64) {
        let user = storage
            .create_user_impl(CreateUserRequest {
                username: "learner".to_string(),
                email: "learner@example.com".to_string(),
                password: "hash".to_string(),
                role: UserRole::Student,
                display_name: None,
                avatar_url: None,
                bio: None,
            })
            .await
            .expect("create user");
        let quiz = storage
            .create_quiz_impl(
                user.id,
                CreateQuizRequest {
                    title: "Greetings".to_string(),
                    description: None,
                    course_id: None,
                    language_id: None,
                    level: None,
                    time_limit: None,
                    passing_score: Some(60.0),
                    allow_retake: Some(true),
                    max_retakes: None,
                    randomize_question_order: None,
                    show_answers_after_submission: None,
                },
            )
            .await
            .expect("create quiz");
        (user.id, quiz.id)
    }

    fn attempt(quiz_id: i64, user_id: i64, number: i32, passed: bool) -> NewQuizAttempt {
        let now = chrono::Utc::now();
        NewQuizAttempt {
            quiz_id,
            user_id,
            answers: Vec::new(),
            started_at: now,
            completed_at: now,
            earned_points: if passed { 2 } else { 0 },
            total_points: 2,
            score: if passed { 100.0 } else { 0.0 },
            passed,
            attempt_number: number,
        }
    }

    #[actix_web::test]
    async fn test_only_passed_attempts_enter_exam_history() {
        let storage = memory_storage().await;
        let (user_id, quiz_id) = seed_quiz(&storage).await;

        let failed = storage
            .record_attempt_impl(attempt(quiz_id, user_id, 1, false), "Greetings")
            .await
            .expect("record failed attempt");
        assert!(!failed.passed);
        assert!(storage.list_exam_history_impl(user_id).await.unwrap().is_empty());

        let passed = storage
            .record_attempt_impl(attempt(quiz_id, user_id, 2, true), "Greetings")
            .await
            .expect("record passed attempt");
        let history = storage.list_exam_history_impl(user_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].attempt_id, passed.id);
        assert_eq!(history[0].quiz_title, "Greetings");
        assert_eq!(storage.count_user_attempts_impl(quiz_id, user_id).await.unwrap(), 2);
    }

    #[actix_web::test]
    async fn test_stale_attempt_number_is_a_conflict() {
        let storage = memory_storage().await;
        let (user_id, quiz_id) = seed_quiz(&storage).await;

        storage
            .record_attempt_impl(attempt(quiz_id, user_id, 1, true), "Greetings")
            .await
            .expect("record first attempt");

        // 并发提交基于同一计数得到相同次数
        let err = storage
            .record_attempt_impl(attempt(quiz_id, user_id, 1, true), "Greetings")
            .await
            .unwrap_err();
        assert!(matches!(err, LangLearnError::Conflict(_)));
        assert_eq!(storage.count_user_attempts_impl(quiz_id, user_id).await.unwrap(), 1);
        assert_eq!(storage.list_exam_history_impl(user_id).await.unwrap().len(), 1);
    }
}
