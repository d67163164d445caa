pub mod attempts;
pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod questions;
pub mod rules;
pub mod scoring;
pub mod status;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{check_owner_or_admin, internal_error, not_found};
use crate::models::ErrorCode;
use crate::models::common::PaginationQuery;
use crate::models::quizzes::{
    entities::Quiz,
    requests::{
        CreateQuestionRequest, CreateQuizRequest, QuizListParams, SubmitAttemptRequest,
        UpdateQuestionRequest, UpdateQuizRequest, UpdateQuizStatusRequest,
    },
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct QuizService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuizService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_quizzes(
        &self,
        request: &HttpRequest,
        query: QuizListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_quizzes(self, request, query).await
    }

    pub async fn create_quiz(
        &self,
        request: &HttpRequest,
        req: CreateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_quiz(self, request, req).await
    }

    pub async fn get_quiz(&self, request: &HttpRequest, quiz_id: i64) -> ActixResult<HttpResponse> {
        detail::get_quiz(self, request, quiz_id).await
    }

    pub async fn update_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        req: UpdateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_quiz(self, request, quiz_id, req).await
    }

    pub async fn delete_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_quiz(self, request, quiz_id).await
    }

    pub async fn update_status(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        req: UpdateQuizStatusRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_status(self, request, quiz_id, req).await
    }

    // 题目管理
    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        questions::list_questions(self, request, quiz_id).await
    }

    pub async fn add_question(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        req: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        questions::add_question(self, request, quiz_id, req).await
    }

    pub async fn update_question(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        question_id: i64,
        req: UpdateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        questions::update_question(self, request, quiz_id, question_id, req).await
    }

    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        questions::delete_question(self, request, quiz_id, question_id).await
    }

    // 作答
    pub async fn start_attempt(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        attempts::start_attempt(self, request, quiz_id).await
    }

    pub async fn submit_attempt(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        req: SubmitAttemptRequest,
    ) -> ActixResult<HttpResponse> {
        attempts::submit_attempt(self, request, quiz_id, req).await
    }

    pub async fn list_my_attempts(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        attempts::list_my_attempts(self, request, quiz_id).await
    }

    pub async fn list_quiz_attempts(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        attempts::list_quiz_attempts(self, request, quiz_id, query).await
    }

    pub async fn get_attempt(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        attempt_id: i64,
    ) -> ActixResult<HttpResponse> {
        attempts::get_attempt(self, request, quiz_id, attempt_id).await
    }
}

/// 查询测验，不存在时返回 404
pub(crate) async fn load_quiz(
    storage: &Arc<dyn Storage>,
    quiz_id: i64,
) -> Result<Quiz, HttpResponse> {
    match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) => Ok(quiz),
        Ok(None) => Err(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => Err(internal_error("查询测验失败", e)),
    }
}

/// 查询测验并校验修改权限（创建者或管理员）
pub(crate) async fn load_owned_quiz(
    storage: &Arc<dyn Storage>,
    quiz_id: i64,
    user: &User,
) -> Result<Quiz, HttpResponse> {
    let quiz = load_quiz(storage, quiz_id).await?;
    check_owner_or_admin(
        user,
        quiz.created_by,
        ErrorCode::QuizPermissionDenied,
        "只能管理自己创建的测验",
    )?;
    Ok(quiz)
}

/// 学员只能看到已发布的测验
pub(crate) fn can_view(quiz: &Quiz, user: &User) -> bool {
    quiz.is_published() || user.role.can_author()
}
