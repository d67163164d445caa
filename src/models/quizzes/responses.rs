use serde::Serialize;
use ts_rs::TS;

use super::entities::{PublicQuestion, Question, Quiz, QuizAttempt};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListResponse {
    pub items: Vec<Quiz>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizDetailResponse {
    pub quiz: Quiz,
    pub question_count: i64,
    pub total_points: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuestionListResponse {
    pub items: Vec<Question>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct StartAttemptResponse {
    pub quiz_id: i64,
    pub title: String,
    pub time_limit: i32,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub attempt_number: i32,
    pub total_points: i64,
    pub questions: Vec<PublicQuestion>,
}

// 提交后的逐题反馈
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuestionFeedback {
    pub question_id: i64,
    pub user_answer: Option<String>,
    pub is_correct: bool,
    pub points_earned: i32,
    pub correct_option_ids: Vec<String>,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptResultResponse {
    pub attempt: QuizAttempt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Vec<QuestionFeedback>>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptListResponse {
    pub items: Vec<QuizAttempt>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct MyAttemptsResponse {
    pub items: Vec<QuizAttempt>,
    pub best_score: Option<f64>,
    pub remaining_attempts: Option<i32>,
}
