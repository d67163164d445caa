//! 预导入模块，方便使用

pub use super::achievements::{
    ActiveModel as AchievementActiveModel, Entity as Achievements, Model as AchievementModel,
};
pub use super::course_enrollments::{
    ActiveModel as CourseEnrollmentActiveModel, Entity as CourseEnrollments,
    Model as CourseEnrollmentModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::exam_history::{
    ActiveModel as ExamHistoryActiveModel, Entity as ExamHistory, Model as ExamHistoryModel,
};
pub use super::languages::{
    ActiveModel as LanguageActiveModel, Entity as Languages, Model as LanguageModel,
};
pub use super::live_session_attendees::{
    ActiveModel as LiveSessionAttendeeActiveModel, Entity as LiveSessionAttendees,
    Model as LiveSessionAttendeeModel,
};
pub use super::live_sessions::{
    ActiveModel as LiveSessionActiveModel, Entity as LiveSessions, Model as LiveSessionModel,
};
pub use super::quiz_attempts::{
    ActiveModel as QuizAttemptActiveModel, Entity as QuizAttempts, Model as QuizAttemptModel,
};
pub use super::quiz_questions::{
    ActiveModel as QuizQuestionActiveModel, Entity as QuizQuestions, Model as QuizQuestionModel,
};
pub use super::quizzes::{ActiveModel as QuizActiveModel, Entity as Quizzes, Model as QuizModel};
pub use super::study_sessions::{
    ActiveModel as StudySessionActiveModel, Entity as StudySessions, Model as StudySessionModel,
};
pub use super::user_achievements::{
    ActiveModel as UserAchievementActiveModel, Entity as UserAchievements,
    Model as UserAchievementModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
