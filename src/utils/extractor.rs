//! 路径参数提取器
//!
//! 将路径中的 ID 解析为正整数，失败时直接返回统一格式的 400 响应，
//! 避免 actix 默认的纯文本错误。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn invalid_id_error(name: &str, raw: Option<&str>) -> actix_web::Error {
    let message = match raw {
        Some(value) => format!("Invalid {name}: '{value}'"),
        None => format!("Missing path parameter: {name}"),
    };
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 解析正整数 ID（> 0）
pub fn parse_positive_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

macro_rules! define_safe_id_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let raw = req.match_info().get($param);
                ready(
                    raw.and_then(parse_positive_id)
                        .map($name)
                        .ok_or_else(|| invalid_id_error($param, raw)),
                )
            }
        }
    };
}

define_safe_id_extractor!(SafeIDI64, "id");
define_safe_id_extractor!(SafeQuestionIdI64, "question_id");
define_safe_id_extractor!(SafeAttemptIdI64, "attempt_id");
define_safe_id_extractor!(SafeUserIdI64, "user_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id() {
        let (req, mut payload) = TestRequest::default()
            .param("id", "42")
            .to_http_parts();
        let id = SafeIDI64::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_invalid_id_is_bad_request() {
        for raw in ["abc", "0", "-3", "1.5"] {
            let (req, mut payload) = TestRequest::default().param("id", raw).to_http_parts();
            let err = SafeIDI64::from_request(&req, &mut payload)
                .await
                .unwrap_err();
            assert_eq!(
                err.as_response_error().status_code(),
                actix_web::http::StatusCode::BAD_REQUEST
            );
        }
    }

    #[actix_web::test]
    async fn test_named_params() {
        let (req, mut payload) = TestRequest::default()
            .param("id", "7")
            .param("attempt_id", "9")
            .to_http_parts();
        let attempt = SafeAttemptIdI64::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(attempt.0, 9);
        assert!(
            SafeQuestionIdI64::from_request(&req, &mut payload)
                .await
                .is_err()
        );
    }
}
