//! 测验作答规则：重做策略、限时校验、题目校验

use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::models::ErrorCode;
use crate::models::quizzes::{
    entities::{Question, QuestionDraft, QuestionOption, QuestionType, Quiz, QuizStatus},
    requests::{CreateQuestionRequest, QuestionOptionInput, UpdateQuestionRequest},
};
use crate::utils::validate::validate_required_text;

const MAX_QUESTION_TEXT: usize = 2000;
const MAX_OPTION_TEXT: usize = 500;
pub const MAX_QUESTION_POINTS: i32 = 1000;

/// 作答被拒绝的原因
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptRejection {
    NotPublished,
    NoQuestions,
    RetakeNotAllowed,
    MaxRetakesReached { max: i32 },
    TimeLimitExceeded { limit_minutes: i32 },
    InvalidStartTime,
    QuestionNotFound(i64),
}

impl AttemptRejection {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotPublished => ErrorCode::QuizNotPublished,
            Self::NoQuestions => ErrorCode::QuizHasNoQuestions,
            Self::RetakeNotAllowed => ErrorCode::RetakeNotAllowed,
            Self::MaxRetakesReached { .. } => ErrorCode::MaxRetakesReached,
            Self::TimeLimitExceeded { .. } => ErrorCode::TimeLimitExceeded,
            Self::InvalidStartTime => ErrorCode::AttemptInvalid,
            Self::QuestionNotFound(_) => ErrorCode::QuestionNotFound,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::QuestionNotFound(_) => StatusCode::NOT_FOUND,
            Self::RetakeNotAllowed | Self::MaxRetakesReached { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::NotPublished => "Quiz is not published".to_string(),
            Self::NoQuestions => "Quiz has no questions".to_string(),
            Self::RetakeNotAllowed => "Retakes are not allowed for this quiz".to_string(),
            Self::MaxRetakesReached { max } => {
                format!("Maximum number of attempts ({max}) reached")
            }
            Self::TimeLimitExceeded { limit_minutes } => {
                format!("Time limit of {limit_minutes} minutes exceeded")
            }
            Self::InvalidStartTime => "Start time is in the future".to_string(),
            Self::QuestionNotFound(id) => format!("Question {id} does not belong to this quiz"),
        }
    }
}

/// 测验结构变更被拒绝的原因
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEditRejection {
    PublishWithoutQuestions,
    RemoveLastPublishedQuestion,
}

impl QuizEditRejection {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::PublishWithoutQuestions => ErrorCode::QuizHasNoQuestions,
            Self::RemoveLastPublishedQuestion => ErrorCode::QuizStatusInvalid,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::PublishWithoutQuestions => "测验至少需要一道题目才能发布",
            Self::RemoveLastPublishedQuestion => "已发布的测验至少保留一道题目，请先撤回发布",
        }
    }
}

/// 发布前至少要有一道题；撤回不受限制
pub fn check_status_change(
    target: &QuizStatus,
    question_count: i64,
) -> Result<(), QuizEditRejection> {
    if *target == QuizStatus::Published && question_count < 1 {
        return Err(QuizEditRejection::PublishWithoutQuestions);
    }
    Ok(())
}

/// 已发布测验不能删掉最后一道题
pub fn check_question_removal(quiz: &Quiz, question_count: i64) -> Result<(), QuizEditRejection> {
    if quiz.is_published() && question_count <= 1 {
        return Err(QuizEditRejection::RemoveLastPublishedQuestion);
    }
    Ok(())
}

/// 发布状态与重做策略，开始与提交时都要检查
pub fn check_can_attempt(quiz: &Quiz, prior_attempts: i64) -> Result<(), AttemptRejection> {
    if !quiz.is_published() {
        return Err(AttemptRejection::NotPublished);
    }
    check_retake_policy(quiz, prior_attempts)
}

/// 重做策略：不允许重做时只能作答一次；max_retakes 为 0 表示不限次数
pub fn check_retake_policy(quiz: &Quiz, prior_attempts: i64) -> Result<(), AttemptRejection> {
    if !quiz.allow_retake && prior_attempts >= 1 {
        return Err(AttemptRejection::RetakeNotAllowed);
    }
    if quiz.max_retakes > 0 && prior_attempts >= i64::from(quiz.max_retakes) {
        return Err(AttemptRejection::MaxRetakesReached {
            max: quiz.max_retakes,
        });
    }
    Ok(())
}

/// 剩余可作答次数，None 表示不限
pub fn remaining_attempts(quiz: &Quiz, prior_attempts: i64) -> Option<i32> {
    let cap = if !quiz.allow_retake {
        1
    } else if quiz.max_retakes > 0 {
        i64::from(quiz.max_retakes)
    } else {
        return None;
    };
    Some((cap - prior_attempts).max(0) as i32)
}

/// 限时校验，time_limit 为 0 表示不限时；grace_seconds 用于容忍网络延迟与时钟偏差
pub fn check_time_limit(
    time_limit_minutes: i32,
    start_time: DateTime<Utc>,
    now: DateTime<Utc>,
    grace_seconds: i64,
) -> Result<(), AttemptRejection> {
    let elapsed = (now - start_time).num_seconds();
    if elapsed < -grace_seconds {
        return Err(AttemptRejection::InvalidStartTime);
    }
    if time_limit_minutes > 0 && elapsed > i64::from(time_limit_minutes) * 60 + grace_seconds {
        return Err(AttemptRejection::TimeLimitExceeded {
            limit_minutes: time_limit_minutes,
        });
    }
    Ok(())
}

/// 测验设置校验：时长与重做次数不能为负，及格线在 0-100 之间
pub fn validate_quiz_settings(
    time_limit: Option<i32>,
    passing_score: Option<f64>,
    max_retakes: Option<i32>,
) -> Result<(), String> {
    if time_limit.is_some_and(|t| t < 0) {
        return Err("Time limit cannot be negative".to_string());
    }
    if passing_score.is_some_and(|p| !(0.0..=100.0).contains(&p)) {
        return Err("Passing score must be between 0 and 100".to_string());
    }
    if max_retakes.is_some_and(|m| m < 0) {
        return Err("Max retakes cannot be negative".to_string());
    }
    Ok(())
}

/// 校验题目并生成待写入数据
pub fn validate_question(req: CreateQuestionRequest) -> Result<QuestionDraft, String> {
    let text = validate_required_text("Question text", &req.text, MAX_QUESTION_TEXT)?;

    let points = req.points.unwrap_or(1);
    if !(1..=MAX_QUESTION_POINTS).contains(&points) {
        return Err(format!("Points must be between 1 and {MAX_QUESTION_POINTS}"));
    }

    let (options, correct_answer) = match req.question_type {
        QuestionType::MultipleChoice => {
            let options = build_options(req.options)?;
            if options.len() < 2 {
                return Err("Multiple choice questions need at least 2 options".to_string());
            }
            if !options.iter().any(|o| o.is_correct) {
                return Err("Multiple choice questions need at least 1 correct option".to_string());
            }
            (options, None)
        }
        QuestionType::TrueFalse => {
            let inputs = if req.options.is_empty() {
                true_false_options(req.correct_answer.as_deref())?
            } else {
                req.options
            };
            let options = build_options(inputs)?;
            if options.len() != 2 {
                return Err("True/false questions need exactly 2 options".to_string());
            }
            if options.iter().filter(|o| o.is_correct).count() != 1 {
                return Err("True/false questions need exactly 1 correct option".to_string());
            }
            (options, None)
        }
        QuestionType::FillInTheBlank | QuestionType::ShortAnswer => {
            let answer = req
                .correct_answer
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .ok_or_else(|| "Correct answer is required for text questions".to_string())?;
            (Vec::new(), Some(answer.to_string()))
        }
    };

    Ok(QuestionDraft {
        text,
        question_type: req.question_type,
        options,
        correct_answer,
        explanation: non_empty(req.explanation),
        difficulty: req.difficulty.unwrap_or_default(),
        points,
        position: req.position,
        media_url: non_empty(req.media_url),
    })
}

/// 将更新请求合并到已有题目上，再走一遍完整校验
pub fn merge_question_update(existing: &Question, update: UpdateQuestionRequest) -> CreateQuestionRequest {
    let question_type = update.question_type.unwrap_or(existing.question_type);
    // 切换题型时不沿用旧选项
    let options = match update.options {
        Some(options) => options,
        None if question_type == existing.question_type => existing
            .options
            .iter()
            .map(|o| QuestionOptionInput {
                id: Some(o.id.clone()),
                text: o.text.clone(),
                is_correct: o.is_correct,
            })
            .collect(),
        None => Vec::new(),
    };

    CreateQuestionRequest {
        text: update.text.unwrap_or_else(|| existing.text.clone()),
        question_type,
        options,
        correct_answer: update
            .correct_answer
            .or_else(|| existing.correct_answer.clone()),
        explanation: update.explanation.or_else(|| existing.explanation.clone()),
        difficulty: Some(update.difficulty.unwrap_or(existing.difficulty)),
        points: Some(update.points.unwrap_or(existing.points)),
        position: update.position,
        media_url: update.media_url.or_else(|| existing.media_url.clone()),
    }
}

fn build_options(inputs: Vec<QuestionOptionInput>) -> Result<Vec<QuestionOption>, String> {
    let mut seen = HashSet::new();
    let mut options = Vec::with_capacity(inputs.len());

    for input in inputs {
        let text = validate_required_text("Option text", &input.text, MAX_OPTION_TEXT)?;
        let id = match input.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => uuid::Uuid::new_v4().to_string(),
        };
        if !seen.insert(id.clone()) {
            return Err(format!("Duplicate option id: {id}"));
        }
        options.push(QuestionOption {
            id,
            text,
            is_correct: input.is_correct,
        });
    }

    Ok(options)
}

// 判断题未给选项时按 correct_answer 生成 True/False
fn true_false_options(correct_answer: Option<&str>) -> Result<Vec<QuestionOptionInput>, String> {
    let answer = match correct_answer.map(|a| a.trim().to_lowercase()) {
        Some(a) if a == "true" => true,
        Some(a) if a == "false" => false,
        _ => {
            return Err(
                "True/false questions need 2 options or a correct answer of true/false"
                    .to_string(),
            );
        }
    };

    Ok(vec![
        QuestionOptionInput {
            id: Some("true".to_string()),
            text: "True".to_string(),
            is_correct: answer,
        },
        QuestionOptionInput {
            id: Some("false".to_string()),
            text: "False".to_string(),
            is_correct: !answer,
        },
    ])
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProficiencyLevel;
    use crate::models::quizzes::entities::{QuestionDifficulty, QuizStatus};
    use chrono::Duration;

    fn quiz(allow_retake: bool, max_retakes: i32) -> Quiz {
        let now = Utc::now();
        Quiz {
            id: 1,
            title: "Hiragana basics".to_string(),
            description: None,
            course_id: None,
            language_id: None,
            level: ProficiencyLevel::Beginner,
            time_limit: 10,
            passing_score: 50.0,
            allow_retake,
            max_retakes,
            randomize_question_order: false,
            show_answers_after_submission: true,
            status: QuizStatus::Published,
            created_by: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn option(text: &str, is_correct: bool) -> QuestionOptionInput {
        QuestionOptionInput {
            id: None,
            text: text.to_string(),
            is_correct,
        }
    }

    fn request(question_type: QuestionType, options: Vec<QuestionOptionInput>) -> CreateQuestionRequest {
        CreateQuestionRequest {
            text: "  Translate: gato  ".to_string(),
            question_type,
            options,
            correct_answer: None,
            explanation: None,
            difficulty: None,
            points: None,
            position: None,
            media_url: None,
        }
    }

    #[test]
    fn test_single_attempt_when_retake_disabled() {
        let q = quiz(false, 0);
        assert!(check_retake_policy(&q, 0).is_ok());
        assert_eq!(
            check_retake_policy(&q, 1),
            Err(AttemptRejection::RetakeNotAllowed)
        );
        assert_eq!(remaining_attempts(&q, 0), Some(1));
        assert_eq!(remaining_attempts(&q, 1), Some(0));
    }

    #[test]
    fn test_max_retakes_bounds_attempts() {
        let q = quiz(true, 3);
        assert!(check_retake_policy(&q, 2).is_ok());
        assert_eq!(
            check_retake_policy(&q, 3),
            Err(AttemptRejection::MaxRetakesReached { max: 3 })
        );
        assert_eq!(remaining_attempts(&q, 1), Some(2));
        assert_eq!(remaining_attempts(&q, 5), Some(0));
    }

    #[test]
    fn test_zero_max_retakes_is_unlimited() {
        let q = quiz(true, 0);
        assert!(check_retake_policy(&q, 1000).is_ok());
        assert_eq!(remaining_attempts(&q, 1000), None);
    }

    #[test]
    fn test_time_limit_rejects_late_submission() {
        let now = Utc::now();
        let started = now - Duration::minutes(15);
        assert_eq!(
            check_time_limit(10, started, now, 30),
            Err(AttemptRejection::TimeLimitExceeded { limit_minutes: 10 })
        );
    }

    #[test]
    fn test_time_limit_allows_grace_period() {
        let now = Utc::now();
        assert!(check_time_limit(10, now - Duration::seconds(610), now, 30).is_ok());
        assert!(check_time_limit(10, now - Duration::seconds(631), now, 30).is_err());
    }

    #[test]
    fn test_no_time_limit() {
        let now = Utc::now();
        assert!(check_time_limit(0, now - Duration::days(3), now, 0).is_ok());
    }

    #[test]
    fn test_future_start_time_rejected() {
        let now = Utc::now();
        assert_eq!(
            check_time_limit(0, now + Duration::minutes(5), now, 30),
            Err(AttemptRejection::InvalidStartTime)
        );
        assert!(check_time_limit(0, now + Duration::seconds(10), now, 30).is_ok());
    }

    #[test]
    fn test_rejection_status_codes() {
        assert_eq!(
            AttemptRejection::TimeLimitExceeded { limit_minutes: 1 }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AttemptRejection::QuestionNotFound(9).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AttemptRejection::RetakeNotAllowed.error_code(),
            ErrorCode::RetakeNotAllowed
        );
    }

    #[test]
    fn test_quiz_settings_validation() {
        assert!(validate_quiz_settings(Some(0), Some(100.0), Some(0)).is_ok());
        assert!(validate_quiz_settings(None, None, None).is_ok());
        assert!(validate_quiz_settings(Some(-1), None, None).is_err());
        assert!(validate_quiz_settings(None, Some(100.5), None).is_err());
        assert!(validate_quiz_settings(None, Some(f64::NAN), None).is_err());
        assert!(validate_quiz_settings(None, None, Some(-2)).is_err());
    }

    #[test]
    fn test_multiple_choice_validation() {
        let draft = validate_question(request(
            QuestionType::MultipleChoice,
            vec![option("cat", true), option("dog", false)],
        ))
        .unwrap();
        assert_eq!(draft.text, "Translate: gato");
        assert_eq!(draft.points, 1);
        assert_eq!(draft.difficulty, QuestionDifficulty::Medium);
        assert_eq!(draft.options.len(), 2);
        assert!(draft.options.iter().all(|o| !o.id.is_empty()));
        assert_ne!(draft.options[0].id, draft.options[1].id);

        assert!(validate_question(request(QuestionType::MultipleChoice, vec![option("cat", true)])).is_err());
        assert!(
            validate_question(request(
                QuestionType::MultipleChoice,
                vec![option("cat", false), option("dog", false)],
            ))
            .is_err()
        );
    }

    #[test]
    fn test_true_false_validation() {
        assert!(
            validate_question(request(
                QuestionType::TrueFalse,
                vec![option("True", true), option("False", true)],
            ))
            .is_err()
        );
        assert!(
            validate_question(request(
                QuestionType::TrueFalse,
                vec![option("True", true), option("False", false), option("Maybe", false)],
            ))
            .is_err()
        );

        let mut req = request(QuestionType::TrueFalse, Vec::new());
        req.correct_answer = Some("False".to_string());
        let draft = validate_question(req).unwrap();
        assert_eq!(draft.options.len(), 2);
        assert!(draft.options.iter().any(|o| o.id == "false" && o.is_correct));
        assert_eq!(draft.correct_answer, None);
    }

    #[test]
    fn test_text_question_requires_answer() {
        let mut req = request(QuestionType::FillInTheBlank, vec![option("ignored", true)]);
        assert!(validate_question(req.clone()).is_err());

        req.correct_answer = Some("  el gato ".to_string());
        let draft = validate_question(req).unwrap();
        assert_eq!(draft.correct_answer.as_deref(), Some("el gato"));
        assert!(draft.options.is_empty());
    }

    #[test]
    fn test_points_must_be_positive() {
        let mut req = request(QuestionType::ShortAnswer, Vec::new());
        req.correct_answer = Some("hola".to_string());
        req.points = Some(0);
        assert!(validate_question(req.clone()).is_err());

        req.points = Some(MAX_QUESTION_POINTS + 1);
        assert!(validate_question(req.clone()).is_err());
        req.points = Some(i32::MAX);
        assert!(validate_question(req.clone()).is_err());

        req.points = Some(MAX_QUESTION_POINTS);
        assert_eq!(validate_question(req).unwrap().points, MAX_QUESTION_POINTS);
    }

    #[test]
    fn test_unpublished_quiz_cannot_be_attempted() {
        let mut draft = quiz(true, 0);
        draft.status = QuizStatus::Draft;
        assert_eq!(check_can_attempt(&draft, 0), Err(AttemptRejection::NotPublished));
        assert_eq!(
            AttemptRejection::NotPublished.error_code(),
            ErrorCode::QuizNotPublished
        );

        let published = quiz(false, 0);
        assert_eq!(check_can_attempt(&published, 0), Ok(()));
        assert_eq!(
            check_can_attempt(&published, 1),
            Err(AttemptRejection::RetakeNotAllowed)
        );
    }

    #[test]
    fn test_publish_requires_a_question() {
        assert_eq!(
            check_status_change(&QuizStatus::Published, 0),
            Err(QuizEditRejection::PublishWithoutQuestions)
        );
        assert_eq!(check_status_change(&QuizStatus::Published, 1), Ok(()));
        assert_eq!(check_status_change(&QuizStatus::Draft, 0), Ok(()));
    }

    #[test]
    fn test_last_question_of_published_quiz_is_kept() {
        let published = quiz(true, 0);
        assert_eq!(
            check_question_removal(&published, 1),
            Err(QuizEditRejection::RemoveLastPublishedQuestion)
        );
        assert_eq!(check_question_removal(&published, 2), Ok(()));

        let mut draft = quiz(true, 0);
        draft.status = QuizStatus::Draft;
        assert_eq!(check_question_removal(&draft, 1), Ok(()));
    }

    #[test]
    fn test_duplicate_option_ids_rejected() {
        let mut a = option("cat", true);
        a.id = Some("x".to_string());
        let mut b = option("dog", false);
        b.id = Some("x".to_string());
        assert!(validate_question(request(QuestionType::MultipleChoice, vec![a, b])).is_err());
    }

    #[test]
    fn test_merge_keeps_existing_options() {
        let draft = validate_question(request(
            QuestionType::MultipleChoice,
            vec![option("cat", true), option("dog", false)],
        ))
        .unwrap();
        let now = Utc::now();
        let existing = Question {
            id: 7,
            quiz_id: 1,
            text: draft.text.clone(),
            question_type: draft.question_type,
            options: draft.options.clone(),
            correct_answer: None,
            explanation: None,
            difficulty: draft.difficulty,
            points: 2,
            position: 1,
            media_url: None,
            created_at: now,
            updated_at: now,
        };

        let merged = merge_question_update(
            &existing,
            UpdateQuestionRequest {
                text: Some("Translate: perro".to_string()),
                ..Default::default()
            },
        );
        let updated = validate_question(merged).unwrap();
        assert_eq!(updated.text, "Translate: perro");
        assert_eq!(updated.points, 2);
        assert_eq!(updated.options, existing.options);

        // 改为填空题后旧选项不再保留，缺少答案则校验失败
        let switched = merge_question_update(
            &existing,
            UpdateQuestionRequest {
                question_type: Some(QuestionType::FillInTheBlank),
                ..Default::default()
            },
        );
        assert!(switched.options.is_empty());
        assert!(validate_question(switched).is_err());
    }
}
