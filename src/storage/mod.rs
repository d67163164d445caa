use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段已是哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 语言管理方法
    async fn create_language(&self, req: CreateLanguageRequest) -> Result<Language>;
    async fn get_language_by_id(&self, id: i64) -> Result<Option<Language>>;
    async fn get_language_by_code(&self, code: &str) -> Result<Option<Language>>;
    async fn list_languages(&self, include_inactive: bool) -> Result<Vec<Language>>;
    async fn update_language(
        &self,
        id: i64,
        update: UpdateLanguageRequest,
    ) -> Result<Option<Language>>;
    async fn delete_language(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    async fn create_course(&self, instructor_id: i64, req: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;

    /// 选课方法
    async fn enroll_user(&self, course_id: i64, user_id: i64) -> Result<Enrollment>;
    async fn get_enrollment(&self, course_id: i64, user_id: i64) -> Result<Option<Enrollment>>;
    async fn unenroll_user(&self, course_id: i64, user_id: i64) -> Result<bool>;
    async fn list_user_enrollments(&self, user_id: i64) -> Result<Vec<EnrolledCourse>>;
    async fn update_enrollment_progress(
        &self,
        course_id: i64,
        user_id: i64,
        progress: i32,
    ) -> Result<Option<Enrollment>>;
    async fn count_course_enrollments(&self, course_id: i64) -> Result<i64>;

    /// 测验管理方法
    async fn create_quiz(&self, created_by: i64, req: CreateQuizRequest) -> Result<Quiz>;
    async fn get_quiz_by_id(&self, id: i64) -> Result<Option<Quiz>>;
    async fn list_quizzes_with_pagination(&self, query: QuizListQuery)
    -> Result<QuizListResponse>;
    async fn update_quiz(&self, id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>>;
    async fn update_quiz_status(&self, id: i64, status: QuizStatus) -> Result<Option<Quiz>>;
    async fn delete_quiz(&self, id: i64) -> Result<bool>;

    /// 题目管理方法
    async fn create_question(&self, quiz_id: i64, draft: QuestionDraft) -> Result<Question>;
    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>>;
    // 按 position、id 排序
    async fn list_questions(&self, quiz_id: i64) -> Result<Vec<Question>>;
    async fn update_question(
        &self,
        question_id: i64,
        draft: QuestionDraft,
    ) -> Result<Option<Question>>;
    async fn delete_question(&self, question_id: i64) -> Result<bool>;
    async fn count_questions(&self, quiz_id: i64) -> Result<i64>;

    /// 作答记录方法
    // 写入作答记录，通过时同时写入考试记录
    async fn record_attempt(&self, attempt: NewQuizAttempt, quiz_title: &str)
    -> Result<QuizAttempt>;
    async fn get_attempt_by_id(&self, attempt_id: i64) -> Result<Option<QuizAttempt>>;
    async fn count_user_attempts(&self, quiz_id: i64, user_id: i64) -> Result<i64>;
    async fn list_user_attempts(&self, quiz_id: i64, user_id: i64) -> Result<Vec<QuizAttempt>>;
    async fn list_quiz_attempts(
        &self,
        quiz_id: i64,
        page: u64,
        size: u64,
    ) -> Result<AttemptListResponse>;
    async fn list_exam_history(&self, user_id: i64) -> Result<Vec<ExamHistoryEntry>>;

    /// 直播课方法
    async fn create_live_session(
        &self,
        host_id: i64,
        req: CreateLiveSessionRequest,
    ) -> Result<LiveSession>;
    async fn get_live_session_by_id(&self, id: i64) -> Result<Option<LiveSession>>;
    async fn list_live_sessions(
        &self,
        query: LiveSessionListQuery,
    ) -> Result<LiveSessionListResponse>;
    async fn update_live_session(
        &self,
        id: i64,
        update: UpdateLiveSessionRequest,
    ) -> Result<Option<LiveSession>>;
    async fn update_live_session_status(
        &self,
        id: i64,
        status: LiveSessionStatus,
    ) -> Result<Option<LiveSession>>;
    async fn delete_live_session(&self, id: i64) -> Result<bool>;
    async fn register_attendee(&self, session_id: i64, user_id: i64)
    -> Result<LiveSessionAttendee>;
    async fn unregister_attendee(&self, session_id: i64, user_id: i64) -> Result<bool>;
    async fn get_attendee(
        &self,
        session_id: i64,
        user_id: i64,
    ) -> Result<Option<LiveSessionAttendee>>;
    async fn list_attendees(&self, session_id: i64) -> Result<Vec<LiveSessionAttendee>>;
    async fn count_attendees(&self, session_id: i64) -> Result<i64>;

    /// 成就方法
    async fn create_achievement(&self, req: CreateAchievementRequest) -> Result<Achievement>;
    async fn get_achievement_by_id(&self, id: i64) -> Result<Option<Achievement>>;
    async fn list_achievements(&self) -> Result<Vec<Achievement>>;
    async fn update_achievement(
        &self,
        id: i64,
        update: UpdateAchievementRequest,
    ) -> Result<Option<Achievement>>;
    async fn delete_achievement(&self, id: i64) -> Result<bool>;
    async fn award_achievement(
        &self,
        user_id: i64,
        achievement_id: i64,
        awarded_by: Option<i64>,
    ) -> Result<UserAchievement>;
    async fn has_user_achievement(&self, user_id: i64, achievement_id: i64) -> Result<bool>;
    async fn list_user_achievements(&self, user_id: i64) -> Result<Vec<UserAchievement>>;

    /// 学习时长方法
    async fn start_study_session(
        &self,
        user_id: i64,
        req: StartStudySessionRequest,
    ) -> Result<StudySession>;
    async fn get_study_session_by_id(&self, id: i64) -> Result<Option<StudySession>>;
    async fn get_open_study_session(&self, user_id: i64) -> Result<Option<StudySession>>;
    async fn end_study_session(
        &self,
        id: i64,
        ended_at: chrono::DateTime<chrono::Utc>,
        notes: Option<String>,
    ) -> Result<Option<StudySession>>;
    async fn list_study_sessions(
        &self,
        user_id: i64,
        page: u64,
        size: u64,
    ) -> Result<StudySessionListResponse>;
    // 指定时间之后开始且已结束的学习记录
    async fn list_completed_study_sessions_since(
        &self,
        user_id: i64,
        since: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<StudySession>>;
}

/// 创建存储实例
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
