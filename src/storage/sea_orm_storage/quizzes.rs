use super::SeaOrmStorage;
use crate::entity::quiz_questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as QuizQuestions,
};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::errors::{LangLearnError, Result};
use crate::models::{
    PaginationInfo,
    quizzes::{
        entities::{Question, QuestionDraft, Quiz, QuizStatus},
        requests::{CreateQuizRequest, QuizListQuery, UpdateQuizRequest},
        responses::QuizListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建测验，缺省字段由服务层补齐
    pub async fn create_quiz_impl(&self, created_by: i64, req: CreateQuizRequest) -> Result<Quiz> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            course_id: Set(req.course_id),
            language_id: Set(req.language_id),
            level: Set(req.level.unwrap_or_default().to_string()),
            time_limit: Set(req.time_limit.unwrap_or(0)),
            passing_score: Set(req.passing_score.unwrap_or_default()),
            allow_retake: Set(req.allow_retake.unwrap_or(true)),
            max_retakes: Set(req.max_retakes.unwrap_or(0)),
            randomize_question_order: Set(req.randomize_question_order.unwrap_or(false)),
            show_answers_after_submission: Set(req.show_answers_after_submission.unwrap_or(true)),
            status: Set(QuizStatus::Draft.to_string()),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("创建测验失败: {e}")))?;

        Ok(result.into_quiz())
    }

    pub async fn get_quiz_by_id_impl(&self, id: i64) -> Result<Option<Quiz>> {
        let result = Quizzes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询测验失败: {e}")))?;

        Ok(result.map(|m| m.into_quiz()))
    }

    pub async fn list_quizzes_with_pagination_impl(
        &self,
        query: QuizListQuery,
    ) -> Result<QuizListResponse> {
        let page = query.page.max(1);
        let size = query.size.clamp(1, 100);

        let mut select = Quizzes::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(language_id) = query.language_id {
            select = select.filter(Column::LanguageId.eq(language_id));
        }
        if let Some(level) = query.level {
            select = select.filter(Column::Level.eq(level.to_string()));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询测验总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询测验页数失败: {e}")))?;
        let quizzes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询测验列表失败: {e}")))?;

        Ok(QuizListResponse {
            items: quizzes.into_iter().map(|m| m.into_quiz()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_quiz_impl(
        &self,
        id: i64,
        update: UpdateQuizRequest,
    ) -> Result<Option<Quiz>> {
        if self.get_quiz_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(course_id) = update.course_id {
            model.course_id = Set(Some(course_id));
        }
        if let Some(language_id) = update.language_id {
            model.language_id = Set(Some(language_id));
        }
        if let Some(level) = update.level {
            model.level = Set(level.to_string());
        }
        if let Some(time_limit) = update.time_limit {
            model.time_limit = Set(time_limit);
        }
        if let Some(passing_score) = update.passing_score {
            model.passing_score = Set(passing_score);
        }
        if let Some(allow_retake) = update.allow_retake {
            model.allow_retake = Set(allow_retake);
        }
        if let Some(max_retakes) = update.max_retakes {
            model.max_retakes = Set(max_retakes);
        }
        if let Some(randomize) = update.randomize_question_order {
            model.randomize_question_order = Set(randomize);
        }
        if let Some(show_answers) = update.show_answers_after_submission {
            model.show_answers_after_submission = Set(show_answers);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("更新测验失败: {e}")))?;

        Ok(Some(result.into_quiz()))
    }

    pub async fn update_quiz_status_impl(
        &self,
        id: i64,
        status: QuizStatus,
    ) -> Result<Option<Quiz>> {
        let result = Quizzes::update_many()
            .col_expr(Column::Status, sea_orm::sea_query::Expr::value(status.to_string()))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("更新测验状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_quiz_by_id_impl(id).await
    }

    /// 删除测验，题目与作答记录随外键级联删除
    pub async fn delete_quiz_impl(&self, id: i64) -> Result<bool> {
        let result = Quizzes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("删除测验失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 新增题目，未指定位置时追加到末尾
    pub async fn create_question_impl(
        &self,
        quiz_id: i64,
        draft: QuestionDraft,
    ) -> Result<Question> {
        let position = match draft.position {
            Some(p) => p,
            None => self.next_question_position(quiz_id).await?,
        };
        let options = serde_json::to_string(&draft.options)
            .map_err(|e| LangLearnError::serialization(format!("序列化选项失败: {e}")))?;
        let now = chrono::Utc::now().timestamp();

        let model = QuestionActiveModel {
            quiz_id: Set(quiz_id),
            text: Set(draft.text),
            question_type: Set(draft.question_type.to_string()),
            options: Set(options),
            correct_answer: Set(draft.correct_answer),
            explanation: Set(draft.explanation),
            difficulty: Set(draft.difficulty.to_string()),
            points: Set(draft.points),
            position: Set(position),
            media_url: Set(draft.media_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    async fn next_question_position(&self, quiz_id: i64) -> Result<i32> {
        let last = QuizQuestions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .order_by_desc(QuestionColumn::Position)
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(last.map(|q| q.position + 1).unwrap_or(1))
    }

    pub async fn get_question_by_id_impl(&self, question_id: i64) -> Result<Option<Question>> {
        let result = QuizQuestions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    pub async fn list_questions_impl(&self, quiz_id: i64) -> Result<Vec<Question>> {
        let result = QuizQuestions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .order_by_asc(QuestionColumn::Position)
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询题目列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_question()).collect())
    }

    /// 用合并后的题目整体覆盖，未指定位置时保持原位置
    pub async fn update_question_impl(
        &self,
        question_id: i64,
        draft: QuestionDraft,
    ) -> Result<Option<Question>> {
        if self.get_question_by_id_impl(question_id).await?.is_none() {
            return Ok(None);
        }

        let options = serde_json::to_string(&draft.options)
            .map_err(|e| LangLearnError::serialization(format!("序列化选项失败: {e}")))?;

        let mut model = QuestionActiveModel {
            id: Set(question_id),
            text: Set(draft.text),
            question_type: Set(draft.question_type.to_string()),
            options: Set(options),
            correct_answer: Set(draft.correct_answer),
            explanation: Set(draft.explanation),
            difficulty: Set(draft.difficulty.to_string()),
            points: Set(draft.points),
            media_url: Set(draft.media_url),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(position) = draft.position {
            model.position = Set(position);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("更新题目失败: {e}")))?;

        Ok(Some(result.into_question()))
    }

    pub async fn delete_question_impl(&self, question_id: i64) -> Result<bool> {
        let result = QuizQuestions::delete_by_id(question_id)
            .exec(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("删除题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_questions_impl(&self, quiz_id: i64) -> Result<i64> {
        let count = QuizQuestions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .count(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("统计题目数量失败: {e}")))?;

        Ok(count as i64)
    }
}
