use super::SeaOrmStorage;
use crate::entity::course_enrollments::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn,
    Entity as CourseEnrollments,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{LangLearnError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, CourseStatus, Enrollment},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseListResponse, EnrolledCourse},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(
        &self,
        instructor_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            language_id: Set(req.language_id),
            level: Set(req.level.unwrap_or_default().to_string()),
            instructor_id: Set(instructor_id),
            status: Set(req.status.unwrap_or(CourseStatus::Draft).to_string()),
            thumbnail_url: Set(req.thumbnail_url),
            estimated_minutes: Set(req.estimated_minutes.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let page = query.page.max(1);
        let size = query.size.clamp(1, 100);

        let mut select = Courses::find();

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

        if let Some(language_id) = query.language_id {
            select = select.filter(Column::LanguageId.eq(language_id));
        }

        if let Some(level) = query.level {
            select = select.filter(Column::Level.eq(level.to_string()));
        }

        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
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
            .map_err(|e| LangLearnError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询课程页数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(id).await?.is_none() {
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
        if let Some(language_id) = update.language_id {
            model.language_id = Set(language_id);
        }
        if let Some(level) = update.level {
            model.level = Set(level.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(thumbnail_url) = update.thumbnail_url {
            model.thumbnail_url = Set(Some(thumbnail_url));
        }
        if let Some(estimated_minutes) = update.estimated_minutes {
            model.estimated_minutes = Set(estimated_minutes);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("更新课程失败: {e}")))?;

        Ok(Some(result.into_course()))
    }

    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 选课
    pub async fn enroll_user_impl(&self, course_id: i64, user_id: i64) -> Result<Enrollment> {
        let model = EnrollmentActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            progress: Set(0),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            completed_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("选课失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    pub async fn get_enrollment_impl(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = CourseEnrollments::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn unenroll_user_impl(&self, course_id: i64, user_id: i64) -> Result<bool> {
        let result = CourseEnrollments::delete_many()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("退课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出用户已选课程，最近选课在前
    pub async fn list_user_enrollments_impl(&self, user_id: i64) -> Result<Vec<EnrolledCourse>> {
        let rows = CourseEnrollments::find()
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .order_by_desc(EnrollmentColumn::EnrolledAt)
            .find_also_related(Courses)
            .all(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询已选课程失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, course)| {
                course.map(|c| EnrolledCourse {
                    course: c.into_course(),
                    enrollment: enrollment.into_enrollment(),
                })
            })
            .collect())
    }

    /// 更新学习进度，达到 100 时记录完成时间
    pub async fn update_enrollment_progress_impl(
        &self,
        course_id: i64,
        user_id: i64,
        progress: i32,
    ) -> Result<Option<Enrollment>> {
        let existing = CourseEnrollments::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("查询选课记录失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let completed_at = if progress >= 100 {
            existing
                .completed_at
                .or(Some(chrono::Utc::now().timestamp()))
        } else {
            None
        };

        let mut model: EnrollmentActiveModel = existing.into();
        model.progress = Set(progress);
        model.completed_at = Set(completed_at);

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("更新学习进度失败: {e}")))?;

        Ok(Some(result.into_enrollment()))
    }

    pub async fn count_course_enrollments_impl(&self, course_id: i64) -> Result<i64> {
        let count = CourseEnrollments::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| LangLearnError::database_operation(format!("统计选课人数失败: {e}")))?;

        Ok(count as i64)
    }
}

