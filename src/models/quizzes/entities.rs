use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::ProficiencyLevel;

crate::define_string_enum! {
    pub enum QuizStatus("../frontend/src/types/generated/quiz.ts") {
        Draft => "draft",
        Published => "published",
    }
}

crate::define_string_enum! {
    pub enum QuestionType("../frontend/src/types/generated/quiz.ts") {
        MultipleChoice => "multiple_choice",
        TrueFalse => "true_false",
        FillInTheBlank => "fill_in_the_blank",
        ShortAnswer => "short_answer",
    }
}

impl QuestionType {
    /// 按选项判分的题型
    pub fn uses_options(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::TrueFalse)
    }
}

crate::define_string_enum! {
    pub enum QuestionDifficulty("../frontend/src/types/generated/quiz.ts") {
        Easy => "easy",
        Medium => "medium",
        Hard => "hard",
    }
}

impl Default for QuestionDifficulty {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<i64>,
    pub language_id: Option<i64>,
    pub level: ProficiencyLevel,
    /// 分钟，0 表示不限时
    pub time_limit: i32,
    /// 百分比
    pub passing_score: f64,
    pub allow_retake: bool,
    /// 0 表示不限次数
    pub max_retakes: i32,
    pub randomize_question_order: bool,
    pub show_answers_after_submission: bool,
    pub status: QuizStatus,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Quiz {
    pub fn is_published(&self) -> bool {
        self.status == QuizStatus::Published
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.created_by == user_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub text: String,
    pub question_type: QuestionType,
    pub options: Vec<QuestionOption>,
    /// 填空/简答题的标准答案
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub difficulty: QuestionDifficulty,
    pub points: i32,
    pub position: i32,
    pub media_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 作答时下发给学员的选项（不含正确标记）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct PublicOption {
    pub id: String,
    pub text: String,
}

// 作答时下发给学员的题目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct PublicQuestion {
    pub id: i64,
    pub text: String,
    pub question_type: QuestionType,
    pub options: Vec<PublicOption>,
    pub difficulty: QuestionDifficulty,
    pub points: i32,
    pub media_url: Option<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            text: q.text.clone(),
            question_type: q.question_type,
            options: q
                .options
                .iter()
                .map(|o| PublicOption {
                    id: o.id.clone(),
                    text: o.text.clone(),
                })
                .collect(),
            difficulty: q.difficulty,
            points: q.points,
            media_url: q.media_url.clone(),
        }
    }
}

// 单题作答记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct AttemptAnswer {
    pub question_id: i64,
    pub user_answer: Option<String>,
    pub is_correct: bool,
    pub points_earned: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub user_id: i64,
    pub answers: Vec<AttemptAnswer>,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
    pub earned_points: i64,
    pub total_points: i64,
    pub score: f64,
    pub passed: bool,
    pub attempt_number: i32,
}

// 校验后的题目数据，用于新增/更新
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    pub text: String,
    pub question_type: QuestionType,
    pub options: Vec<QuestionOption>,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub difficulty: QuestionDifficulty,
    pub points: i32,
    pub position: Option<i32>,
    pub media_url: Option<String>,
}

// 待写入的作答记录
#[derive(Debug, Clone)]
pub struct NewQuizAttempt {
    pub quiz_id: i64,
    pub user_id: i64,
    pub answers: Vec<AttemptAnswer>,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
    pub earned_points: i64,
    pub total_points: i64,
    pub score: f64,
    pub passed: bool,
    pub attempt_number: i32,
}

// 考试记录：通过的测验摘要
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct ExamHistoryEntry {
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,
    pub quiz_title: String,
    pub attempt_id: i64,
    pub score: f64,
    pub passed_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_question_hides_answers() {
        let now = chrono::Utc::now();
        let question = Question {
            id: 1,
            quiz_id: 1,
            text: "¿Cómo estás?".to_string(),
            question_type: QuestionType::MultipleChoice,
            options: vec![
                QuestionOption {
                    id: "a".to_string(),
                    text: "Bien".to_string(),
                    is_correct: true,
                },
                QuestionOption {
                    id: "b".to_string(),
                    text: "Azul".to_string(),
                    is_correct: false,
                },
            ],
            correct_answer: None,
            explanation: Some("Bien = fine".to_string()),
            difficulty: QuestionDifficulty::Easy,
            points: 1,
            position: 0,
            media_url: None,
            created_at: now,
            updated_at: now,
        };

        let public = serde_json::to_value(PublicQuestion::from(&question)).unwrap();
        let rendered = public.to_string();
        assert!(!rendered.contains("is_correct"));
        assert!(!rendered.contains("explanation"));
        assert!(!rendered.contains("correct_answer"));
        assert_eq!(public["options"].as_array().unwrap().len(), 2);
    }
}
