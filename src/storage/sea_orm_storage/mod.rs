//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod achievements;
mod attempts;
mod courses;
mod languages;
mod live_sessions;
mod quizzes;
mod study_sessions;
mod users;

use crate::config::AppConfig;
use crate::errors::{LangLearnError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LangLearnError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| LangLearnError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| LangLearnError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LangLearnError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    achievements::{
        entities::{Achievement, UserAchievement},
        requests::{CreateAchievementRequest, UpdateAchievementRequest},
    },
    courses::{
        entities::{Course, Enrollment},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseListResponse, EnrolledCourse},
    },
    languages::{
        entities::Language,
        requests::{CreateLanguageRequest, UpdateLanguageRequest},
    },
    live_sessions::{
        entities::{LiveSession, LiveSessionAttendee, LiveSessionStatus},
        requests::{CreateLiveSessionRequest, LiveSessionListQuery, UpdateLiveSessionRequest},
        responses::LiveSessionListResponse,
    },
    quizzes::{
        entities::{
            ExamHistoryEntry, NewQuizAttempt, Question, QuestionDraft, Quiz, QuizAttempt,
            QuizStatus,
        },
        requests::{CreateQuizRequest, QuizListQuery, UpdateQuizRequest},
        responses::{AttemptListResponse, QuizListResponse},
    },
    study_sessions::{
        entities::StudySession, requests::StartStudySessionRequest,
        responses::StudySessionListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 语言模块
    async fn create_language(&self, req: CreateLanguageRequest) -> Result<Language> {
        self.create_language_impl(req).await
    }

    async fn get_language_by_id(&self, id: i64) -> Result<Option<Language>> {
        self.get_language_by_id_impl(id).await
    }

    async fn get_language_by_code(&self, code: &str) -> Result<Option<Language>> {
        self.get_language_by_code_impl(code).await
    }

    async fn list_languages(&self, include_inactive: bool) -> Result<Vec<Language>> {
        self.list_languages_impl(include_inactive).await
    }

    async fn update_language(
        &self,
        id: i64,
        update: UpdateLanguageRequest,
    ) -> Result<Option<Language>> {
        self.update_language_impl(id, update).await
    }

    async fn delete_language(&self, id: i64) -> Result<bool> {
        self.delete_language_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, instructor_id: i64, req: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(instructor_id, req).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn enroll_user(&self, course_id: i64, user_id: i64) -> Result<Enrollment> {
        self.enroll_user_impl(course_id, user_id).await
    }

    async fn get_enrollment(&self, course_id: i64, user_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(course_id, user_id).await
    }

    async fn unenroll_user(&self, course_id: i64, user_id: i64) -> Result<bool> {
        self.unenroll_user_impl(course_id, user_id).await
    }

    async fn list_user_enrollments(&self, user_id: i64) -> Result<Vec<EnrolledCourse>> {
        self.list_user_enrollments_impl(user_id).await
    }

    async fn update_enrollment_progress(
        &self,
        course_id: i64,
        user_id: i64,
        progress: i32,
    ) -> Result<Option<Enrollment>> {
        self.update_enrollment_progress_impl(course_id, user_id, progress)
            .await
    }

    async fn count_course_enrollments(&self, course_id: i64) -> Result<i64> {
        self.count_course_enrollments_impl(course_id).await
    }

    // 测验模块
    async fn create_quiz(&self, created_by: i64, req: CreateQuizRequest) -> Result<Quiz> {
        self.create_quiz_impl(created_by, req).await
    }

    async fn get_quiz_by_id(&self, id: i64) -> Result<Option<Quiz>> {
        self.get_quiz_by_id_impl(id).await
    }

    async fn list_quizzes_with_pagination(
        &self,
        query: QuizListQuery,
    ) -> Result<QuizListResponse> {
        self.list_quizzes_with_pagination_impl(query).await
    }

    async fn update_quiz(&self, id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>> {
        self.update_quiz_impl(id, update).await
    }

    async fn update_quiz_status(&self, id: i64, status: QuizStatus) -> Result<Option<Quiz>> {
        self.update_quiz_status_impl(id, status).await
    }

    async fn delete_quiz(&self, id: i64) -> Result<bool> {
        self.delete_quiz_impl(id).await
    }

    async fn create_question(&self, quiz_id: i64, draft: QuestionDraft) -> Result<Question> {
        self.create_question_impl(quiz_id, draft).await
    }

    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>> {
        self.get_question_by_id_impl(question_id).await
    }

    async fn list_questions(&self, quiz_id: i64) -> Result<Vec<Question>> {
        self.list_questions_impl(quiz_id).await
    }

    async fn update_question(
        &self,
        question_id: i64,
        draft: QuestionDraft,
    ) -> Result<Option<Question>> {
        self.update_question_impl(question_id, draft).await
    }

    async fn delete_question(&self, question_id: i64) -> Result<bool> {
        self.delete_question_impl(question_id).await
    }

    async fn count_questions(&self, quiz_id: i64) -> Result<i64> {
        self.count_questions_impl(quiz_id).await
    }

    // 作答模块
    async fn record_attempt(
        &self,
        attempt: NewQuizAttempt,
        quiz_title: &str,
    ) -> Result<QuizAttempt> {
        self.record_attempt_impl(attempt, quiz_title).await
    }

    async fn get_attempt_by_id(&self, attempt_id: i64) -> Result<Option<QuizAttempt>> {
        self.get_attempt_by_id_impl(attempt_id).await
    }

    async fn count_user_attempts(&self, quiz_id: i64, user_id: i64) -> Result<i64> {
        self.count_user_attempts_impl(quiz_id, user_id).await
    }

    async fn list_user_attempts(&self, quiz_id: i64, user_id: i64) -> Result<Vec<QuizAttempt>> {
        self.list_user_attempts_impl(quiz_id, user_id).await
    }

    async fn list_quiz_attempts(
        &self,
        quiz_id: i64,
        page: u64,
        size: u64,
    ) -> Result<AttemptListResponse> {
        self.list_quiz_attempts_impl(quiz_id, page, size).await
    }

    async fn list_exam_history(&self, user_id: i64) -> Result<Vec<ExamHistoryEntry>> {
        self.list_exam_history_impl(user_id).await
    }

    // 直播模块
    async fn create_live_session(
        &self,
        host_id: i64,
        req: CreateLiveSessionRequest,
    ) -> Result<LiveSession> {
        self.create_live_session_impl(host_id, req).await
    }

    async fn get_live_session_by_id(&self, id: i64) -> Result<Option<LiveSession>> {
        self.get_live_session_by_id_impl(id).await
    }

    async fn list_live_sessions(
        &self,
        query: LiveSessionListQuery,
    ) -> Result<LiveSessionListResponse> {
        self.list_live_sessions_impl(query).await
    }

    async fn update_live_session(
        &self,
        id: i64,
        update: UpdateLiveSessionRequest,
    ) -> Result<Option<LiveSession>> {
        self.update_live_session_impl(id, update).await
    }

    async fn update_live_session_status(
        &self,
        id: i64,
        status: LiveSessionStatus,
    ) -> Result<Option<LiveSession>> {
        self.update_live_session_status_impl(id, status).await
    }

    async fn delete_live_session(&self, id: i64) -> Result<bool> {
        self.delete_live_session_impl(id).await
    }

    async fn register_attendee(
        &self,
        session_id: i64,
        user_id: i64,
    ) -> Result<LiveSessionAttendee> {
        self.register_attendee_impl(session_id, user_id).await
    }

    async fn unregister_attendee(&self, session_id: i64, user_id: i64) -> Result<bool> {
        self.unregister_attendee_impl(session_id, user_id).await
    }

    async fn get_attendee(
        &self,
        session_id: i64,
        user_id: i64,
    ) -> Result<Option<LiveSessionAttendee>> {
        self.get_attendee_impl(session_id, user_id).await
    }

    async fn list_attendees(&self, session_id: i64) -> Result<Vec<LiveSessionAttendee>> {
        self.list_attendees_impl(session_id).await
    }

    async fn count_attendees(&self, session_id: i64) -> Result<i64> {
        self.count_attendees_impl(session_id).await
    }

    // 成就模块
    async fn create_achievement(&self, req: CreateAchievementRequest) -> Result<Achievement> {
        self.create_achievement_impl(req).await
    }

    async fn get_achievement_by_id(&self, id: i64) -> Result<Option<Achievement>> {
        self.get_achievement_by_id_impl(id).await
    }

    async fn list_achievements(&self) -> Result<Vec<Achievement>> {
        self.list_achievements_impl().await
    }

    async fn update_achievement(
        &self,
        id: i64,
        update: UpdateAchievementRequest,
    ) -> Result<Option<Achievement>> {
        self.update_achievement_impl(id, update).await
    }

    async fn delete_achievement(&self, id: i64) -> Result<bool> {
        self.delete_achievement_impl(id).await
    }

    async fn award_achievement(
        &self,
        user_id: i64,
        achievement_id: i64,
        awarded_by: Option<i64>,
    ) -> Result<UserAchievement> {
        self.award_achievement_impl(user_id, achievement_id, awarded_by)
            .await
    }

    async fn has_user_achievement(&self, user_id: i64, achievement_id: i64) -> Result<bool> {
        self.has_user_achievement_impl(user_id, achievement_id)
            .await
    }

    async fn list_user_achievements(&self, user_id: i64) -> Result<Vec<UserAchievement>> {
        self.list_user_achievements_impl(user_id).await
    }

    // 学习时长模块
    async fn start_study_session(
        &self,
        user_id: i64,
        req: StartStudySessionRequest,
    ) -> Result<StudySession> {
        self.start_study_session_impl(user_id, req).await
    }

    async fn get_study_session_by_id(&self, id: i64) -> Result<Option<StudySession>> {
        self.get_study_session_by_id_impl(id).await
    }

    async fn get_open_study_session(&self, user_id: i64) -> Result<Option<StudySession>> {
        self.get_open_study_session_impl(user_id).await
    }

    async fn end_study_session(
        &self,
        id: i64,
        ended_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> Result<Option<StudySession>> {
        self.end_study_session_impl(id, ended_at, notes).await
    }

    async fn list_study_sessions(
        &self,
        user_id: i64,
        page: u64,
        size: u64,
    ) -> Result<StudySessionListResponse> {
        self.list_study_sessions_impl(user_id, page, size).await
    }

    async fn list_completed_study_sessions_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<StudySession>> {
        self.list_completed_study_sessions_since_impl(user_id, since)
            .await
    }
}
