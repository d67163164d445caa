use serde::Deserialize;
use ts_rs::TS;

use super::entities::{QuestionDifficulty, QuestionType, QuizStatus};
use crate::models::common::pagination::deserialize_optional_i64;
use crate::models::common::{PaginationQuery, ProficiencyLevel};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct CreateQuizRequest {
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub level: Option<ProficiencyLevel>,
    pub time_limit: Option<i32>,
    pub passing_score: Option<f64>,
    pub allow_retake: Option<bool>,
    pub max_retakes: Option<i32>,
    pub randomize_question_order: Option<bool>,
    pub show_answers_after_submission: Option<bool>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct UpdateQuizRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub level: Option<ProficiencyLevel>,
    pub time_limit: Option<i32>,
    pub passing_score: Option<f64>,
    pub allow_retake: Option<bool>,
    pub max_retakes: Option<i32>,
    pub randomize_question_order: Option<bool>,
    pub show_answers_after_submission: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub language_id: Option<i64>,
    pub level: Option<ProficiencyLevel>,
    pub status: Option<QuizStatus>,
    pub search: Option<String>,
}

// 存储层查询条件
#[derive(Debug, Clone, Default)]
pub struct QuizListQuery {
    pub page: u64,
    pub size: u64,
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub level: Option<ProficiencyLevel>,
    pub status: Option<QuizStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuestionOptionInput {
    /// 缺省时由服务端生成
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

// 新增题目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct CreateQuestionRequest {
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<QuestionOptionInput>,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub difficulty: Option<QuestionDifficulty>,
    pub points: Option<i32>,
    pub position: Option<i32>,
    pub media_url: Option<String>,
}

// 更新题目（未提供的字段保持不变）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct UpdateQuestionRequest {
    pub text: Option<String>,
    pub question_type: Option<QuestionType>,
    pub options: Option<Vec<QuestionOptionInput>>,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub difficulty: Option<QuestionDifficulty>,
    pub points: Option<i32>,
    pub position: Option<i32>,
    pub media_url: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct UpdateQuizStatusRequest {
    pub status: QuizStatus,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct SubmittedAnswer {
    pub question_id: i64,
    pub user_answer: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct SubmitAttemptRequest {
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
    /// 开始作答时间，由开始接口返回
    pub start_time: chrono::DateTime<chrono::Utc>,
}
