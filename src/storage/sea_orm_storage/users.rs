use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{LangLearnError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

fn query_failed(e: sea_orm::DbErr) -> LangLearnError {
    LangLearnError::database_operation(format!("查询用户失败: {e}"))
}

impl SeaOrmStorage {
    /// 新用户默认激活，密码字段已是哈希
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name),
            avatar_url: Set(req.avatar_url),
            bio: Set(req.bio),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map(|m| m.into_user())
            .map_err(|e| LangLearnError::database_operation(format!("创建用户失败: {e}")))
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        Users::find_by_id(id)
            .one(&self.db)
            .await
            .map(|m| m.map(|m| m.into_user()))
            .map_err(query_failed)
    }

    async fn find_user_where(&self, condition: Condition) -> Result<Option<User>> {
        Users::find()
            .filter(condition)
            .one(&self.db)
            .await
            .map(|m| m.map(|m| m.into_user()))
            .map_err(query_failed)
    }

    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        self.find_user_where(Condition::all().add(Column::Username.eq(username)))
            .await
    }

    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        self.find_user_where(Condition::all().add(Column::Email.eq(email)))
            .await
    }

    /// 登录时用户名与邮箱均可
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        self.find_user_where(
            Condition::any()
                .add(Column::Username.eq(identifier))
                .add(Column::Email.eq(identifier.to_lowercase())),
        )
        .await
    }

    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.max(1);
        let size = query.size.clamp(1, 100);

        let mut filter = Condition::all();
        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let escaped = escape_like_pattern(search);
            filter = filter.add(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::DisplayName.contains(&escaped)),
            );
        }
        if let Some(role) = &query.role {
            filter = filter.add(Column::Role.eq(role.to_string()));
        }
        if let Some(status) = &query.status {
            filter = filter.add(Column::Status.eq(status.to_string()));
        }

        let paginator = Users::find()
            .filter(filter)
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询用户总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询用户页数失败: {e}")))?;
        let users = paginator.fetch_page(page - 1).await.map_err(query_failed)?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        Users::update_many()
            .col_expr(Column::LastLogin, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map(|r| r.rows_affected > 0)
            .map_err(|e| LangLearnError::database_operation(format!("更新最后登录时间失败: {e}")))
    }

    /// 只写入请求中出现的字段
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_failed)?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if update.display_name.is_some() {
            model.display_name = Set(update.display_name);
        }
        if update.avatar_url.is_some() {
            model.avatar_url = Set(update.avatar_url);
        }
        if update.bio.is_some() {
            model.bio = Set(update.bio);
        }

        model
            .update(&self.db)
            .await
            .map(|m| Some(m.into_user()))
            .map_err(|e| LangLearnError::database_operation(format!("更新用户失败: {e}")))
    }

    /// 报名、作答、成就等记录随外键级联删除
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map(|r| r.rows_affected > 0)
            .map_err(|e| LangLearnError::database_operation(format!("删除用户失败: {e}")))
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("统计用户数量失败: {e}")))
    }
}
