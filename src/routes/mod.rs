pub mod achievements;

pub mod auth;

pub mod courses;

pub mod languages;

pub mod live_sessions;

pub mod quizzes;

pub mod study_sessions;

pub mod system;

pub mod users;

pub use achievements::configure_achievement_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use languages::configure_language_routes;
pub use live_sessions::configure_live_session_routes;
pub use quizzes::configure_quiz_routes;
pub use study_sessions::configure_study_session_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
