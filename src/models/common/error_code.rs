use serde::{Serialize, Serializer};

/// 业务错误码，随 [`ApiResponse`](super::ApiResponse) 一起返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证 2xxx
    AuthFailed = 2000,
    RegisterFailed = 2001,
    TokenInvalid = 2002,
    RoleNotAllowed = 2003,

    // 用户 3xxx
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserNameInvalid = 3002,
    UserEmailInvalid = 3003,
    UserPasswordInvalid = 3004,
    UserNameAlreadyExists = 3005,
    UserEmailAlreadyExists = 3006,
    UserCreationFailed = 3007,
    UserUpdateFailed = 3008,
    UserDeleteFailed = 3009,
    CanNotDeleteCurrentUser = 3010,
    UserNotActive = 3011,

    // 语言 4xxx
    LanguageNotFound = 4000,
    LanguageCodeAlreadyExists = 4001,
    LanguageValidationFailed = 4002,

    // 课程 5xxx
    CourseNotFound = 5000,
    CoursePermissionDenied = 5001,
    CourseValidationFailed = 5002,
    CourseNotPublished = 5003,
    CourseAlreadyEnrolled = 5004,
    CourseNotEnrolled = 5005,

    // 测验 6xxx
    QuizNotFound = 6000,
    QuizNotPublished = 6001,
    QuizPermissionDenied = 6002,
    QuizValidationFailed = 6003,
    QuizHasNoQuestions = 6004,
    QuestionNotFound = 6005,
    QuestionInvalid = 6006,
    RetakeNotAllowed = 6007,
    MaxRetakesReached = 6008,
    TimeLimitExceeded = 6009,
    AttemptInvalid = 6010,
    AttemptNotFound = 6011,
    QuizStatusInvalid = 6012,

    // 直播课 7xxx
    LiveSessionNotFound = 7000,
    LiveSessionPermissionDenied = 7001,
    LiveSessionValidationFailed = 7002,
    LiveSessionStatusInvalid = 7003,
    LiveSessionFull = 7004,
    LiveSessionAlreadyRegistered = 7005,
    LiveSessionNotRegistered = 7006,
    LiveSessionClosed = 7007,

    // 成就 8xxx
    AchievementNotFound = 8000,
    AchievementValidationFailed = 8001,
    AchievementAlreadyAwarded = 8002,

    // 学习时长 9xxx
    StudySessionNotFound = 9000,
    StudySessionAlreadyActive = 9001,
    StudySessionAlreadyEnded = 9002,
    StudySessionPermissionDenied = 9003,
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(*self as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::RateLimitExceeded as i32, 1029);
        assert_eq!(ErrorCode::TimeLimitExceeded as i32, 6009);
        assert_eq!(serde_json::to_string(&ErrorCode::NotFound).unwrap(), "1004");
    }
}
