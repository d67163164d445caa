//! 判分：逐题比对作答并汇总得分

use std::collections::HashMap;

use super::rules::AttemptRejection;
use crate::models::quizzes::{
    entities::{AttemptAnswer, Question},
    requests::SubmittedAnswer,
    responses::QuestionFeedback,
};

#[derive(Debug, Clone, PartialEq)]
pub struct GradedSubmission {
    pub answers: Vec<AttemptAnswer>,
    pub earned_points: i64,
    pub total_points: i64,
    /// 百分比，保留两位小数；是否及格按未取整的比例判断
    pub score: f64,
    pub passed: bool,
}

/// 选择题与判断题先按选项 id 匹配，没有命中再按选项文本匹配；
/// 填空与简答题忽略大小写和首尾空白比对
pub fn is_answer_correct(question: &Question, answer: &str) -> bool {
    let answer = answer.trim();
    if answer.is_empty() {
        return false;
    }
    let normalized = answer.to_lowercase();

    if question.question_type.uses_options() {
        let options = &question.options;
        options
            .iter()
            .find(|o| o.id == answer)
            .or_else(|| {
                options
                    .iter()
                    .find(|o| o.text.trim().to_lowercase() == normalized)
            })
            .is_some_and(|o| o.is_correct)
    } else {
        question
            .correct_answer
            .as_deref()
            .is_some_and(|expected| expected.trim().to_lowercase() == normalized)
    }
}

/// 对一次提交判分；每道题都会记录，未作答视为错误，同一题重复提交以第一次为准
pub fn grade_submission(
    questions: &[Question],
    submitted: &[SubmittedAnswer],
    passing_score: f64,
) -> Result<GradedSubmission, AttemptRejection> {
    let mut by_question: HashMap<i64, Option<&str>> = HashMap::new();
    for answer in submitted {
        if !questions.iter().any(|q| q.id == answer.question_id) {
            return Err(AttemptRejection::QuestionNotFound(answer.question_id));
        }
        by_question
            .entry(answer.question_id)
            .or_insert(answer.user_answer.as_deref());
    }

    let mut answers = Vec::with_capacity(questions.len());
    let mut earned_points = 0i64;
    let mut total_points = 0i64;

    for question in questions {
        total_points += i64::from(question.points);
        let user_answer = by_question.get(&question.id).copied().flatten();
        let is_correct = user_answer.is_some_and(|a| is_answer_correct(question, a));
        let points_earned = if is_correct { question.points } else { 0 };
        earned_points += i64::from(points_earned);

        answers.push(AttemptAnswer {
            question_id: question.id,
            user_answer: user_answer.map(str::to_string),
            is_correct,
            points_earned,
        });
    }

    let exact = exact_percentage(earned_points, total_points);

    Ok(GradedSubmission {
        answers,
        earned_points,
        total_points,
        score: round_score(exact),
        passed: exact >= passing_score,
    })
}

/// 未取整的得分百分比，总分为 0 时记 0 分
fn exact_percentage(earned: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    earned as f64 / total as f64 * 100.0
}

fn round_score(raw: f64) -> f64 {
    (raw * 100.0).round() / 100.0
}


/// 提交后展示的逐题反馈
pub fn build_feedback(questions: &[Question], answers: &[AttemptAnswer]) -> Vec<QuestionFeedback> {
    answers
        .iter()
        .filter_map(|answer| {
            let question = questions.iter().find(|q| q.id == answer.question_id)?;
            Some(QuestionFeedback {
                question_id: answer.question_id,
                user_answer: answer.user_answer.clone(),
                is_correct: answer.is_correct,
                points_earned: answer.points_earned,
                correct_option_ids: question
                    .options
                    .iter()
                    .filter(|o| o.is_correct)
                    .map(|o| o.id.clone())
                    .collect(),
                correct_answer: question.correct_answer.clone(),
                explanation: question.explanation.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::entities::{QuestionDifficulty, QuestionOption, QuestionType};

    fn choice_question(id: i64, points: i32) -> Question {
        let now = chrono::Utc::now();
        Question {
            id,
            quiz_id: 1,
            text: format!("Question {id}"),
            question_type: QuestionType::MultipleChoice,
            options: vec![
                QuestionOption {
                    id: "a".to_string(),
                    text: "Hola".to_string(),
                    is_correct: true,
                },
                QuestionOption {
                    id: "b".to_string(),
                    text: "Adiós".to_string(),
                    is_correct: false,
                },
            ],
            correct_answer: None,
            explanation: Some("Hola = hello".to_string()),
            difficulty: QuestionDifficulty::Easy,
            points,
            position: id as i32,
            media_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn text_question(id: i64, answer: &str) -> Question {
        Question {
            question_type: QuestionType::FillInTheBlank,
            options: Vec::new(),
            correct_answer: Some(answer.to_string()),
            ..choice_question(id, 1)
        }
    }

    fn submit(question_id: i64, answer: &str) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id,
            user_answer: Some(answer.to_string()),
        }
    }

    #[test]
    fn test_half_correct_passes_at_fifty() {
        let questions = vec![choice_question(1, 1), choice_question(2, 1)];
        let graded =
            grade_submission(&questions, &[submit(1, "a"), submit(2, "b")], 50.0).unwrap();
        assert_eq!(graded.earned_points, 1);
        assert_eq!(graded.total_points, 2);
        assert_eq!(graded.score, 50.0);
        assert!(graded.passed);
    }

    #[test]
    fn test_below_passing_score() {
        let questions = vec![choice_question(1, 1), choice_question(2, 3)];
        let graded = grade_submission(&questions, &[submit(1, "a")], 50.0).unwrap();
        assert_eq!(graded.score, 25.0);
        assert!(!graded.passed);
    }

    #[test]
    fn test_unanswered_questions_recorded() {
        let questions = vec![choice_question(1, 1), choice_question(2, 1)];
        let graded = grade_submission(&questions, &[], 60.0).unwrap();
        assert_eq!(graded.answers.len(), 2);
        assert!(graded.answers.iter().all(|a| a.user_answer.is_none() && !a.is_correct));
        assert_eq!(graded.score, 0.0);
    }

    #[test]
    fn test_unknown_question_rejected() {
        let questions = vec![choice_question(1, 1)];
        assert_eq!(
            grade_submission(&questions, &[submit(99, "a")], 50.0),
            Err(AttemptRejection::QuestionNotFound(99))
        );
    }

    #[test]
    fn test_first_duplicate_answer_wins() {
        let questions = vec![choice_question(1, 1)];
        let graded =
            grade_submission(&questions, &[submit(1, "b"), submit(1, "a")], 50.0).unwrap();
        assert_eq!(graded.answers[0].user_answer.as_deref(), Some("b"));
        assert!(!graded.passed);
    }

    #[test]
    fn test_option_text_match_is_case_insensitive() {
        let q = choice_question(1, 1);
        assert!(is_answer_correct(&q, "  hola "));
        assert!(is_answer_correct(&q, "a"));
        assert!(!is_answer_correct(&q, "ADIÓS"));
        assert!(!is_answer_correct(&q, "c"));
        assert!(!is_answer_correct(&q, ""));
    }

    #[test]
    fn test_text_answer_comparison() {
        let q = text_question(1, "El Gato");
        assert!(is_answer_correct(&q, "  el gato"));
        assert!(!is_answer_correct(&q, "el perro"));
    }

    #[test]
    fn test_pass_decided_before_rounding() {
        let questions = vec![choice_question(1, 2), choice_question(2, 1)];
        let graded =
            grade_submission(&questions, &[submit(1, "a"), submit(2, "b")], 66.67).unwrap();
        assert_eq!(graded.score, 66.67);
        assert!(!graded.passed);

        let graded =
            grade_submission(&questions, &[submit(1, "a"), submit(2, "b")], 66.66).unwrap();
        assert!(graded.passed);
    }

    #[test]
    fn test_option_id_takes_precedence_over_text() {
        let mut q = choice_question(1, 1);
        q.options = vec![
            QuestionOption {
                id: "1".to_string(),
                text: "3".to_string(),
                is_correct: true,
            },
            QuestionOption {
                id: "2".to_string(),
                text: "2".to_string(),
                is_correct: false,
            },
            QuestionOption {
                id: "3".to_string(),
                text: "1".to_string(),
                is_correct: false,
            },
        ];
        assert!(!is_answer_correct(&q, "3"));
        assert!(is_answer_correct(&q, "1"));

        q.options[0].id = "x".to_string();
        q.options[2].id = "y".to_string();
        assert!(is_answer_correct(&q, "3"));
    }

    #[test]
    fn test_large_point_totals_do_not_overflow() {
        let questions = vec![choice_question(1, i32::MAX), choice_question(2, i32::MAX)];
        let graded =
            grade_submission(&questions, &[submit(1, "a"), submit(2, "b")], 50.0).unwrap();
        assert_eq!(graded.total_points, 2 * i64::from(i32::MAX));
        assert_eq!(graded.earned_points, i64::from(i32::MAX));
        assert_eq!(graded.score, 50.0);
        assert!(graded.passed);
    }

    #[test]
    fn test_score_rounding_and_zero_total() {
        assert_eq!(round_score(exact_percentage(1, 3)), 33.33);
        assert_eq!(round_score(exact_percentage(2, 3)), 66.67);
        assert_eq!(exact_percentage(0, 0), 0.0);
    }

    #[test]
    fn test_feedback_reveals_answers() {
        let questions = vec![choice_question(1, 2), text_question(2, "gato")];
        let graded =
            grade_submission(&questions, &[submit(1, "b"), submit(2, "Gato")], 70.0).unwrap();
        let feedback = build_feedback(&questions, &graded.answers);
        assert_eq!(feedback.len(), 2);
        assert_eq!(feedback[0].correct_option_ids, vec!["a".to_string()]);
        assert!(!feedback[0].is_correct);
        assert_eq!(feedback[1].correct_answer.as_deref(), Some("gato"));
        assert!(feedback[1].is_correct);
        assert_eq!(graded.score, 33.33);
    }
}
