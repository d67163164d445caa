pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{
    AttemptAnswer, ExamHistoryEntry, NewQuizAttempt, PublicOption, PublicQuestion, Question,
    QuestionDifficulty, QuestionDraft, QuestionOption, QuestionType, Quiz, QuizAttempt,
    QuizStatus,
};
