pub mod create;
pub mod delete;
pub mod detail;
pub mod enrollment;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{check_owner_or_admin, internal_error, not_found};
use crate::models::ErrorCode;
use crate::models::courses::{
    entities::{Course, CourseStatus},
    requests::{CourseListParams, CreateCourseRequest, UpdateCourseRequest, UpdateProgressRequest},
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        req: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, req).await
    }

    pub async fn get_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_course(self, request, course_id).await
    }

    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        req: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, req).await
    }

    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_id).await
    }

    // 选课
    pub async fn enroll(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        enrollment::enroll(self, request, course_id).await
    }

    pub async fn unenroll(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        enrollment::unenroll(self, request, course_id).await
    }

    pub async fn list_enrolled(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        enrollment::list_enrolled(self, request).await
    }

    pub async fn update_progress(
        &self,
        request: &HttpRequest,
        course_id: i64,
        req: UpdateProgressRequest,
    ) -> ActixResult<HttpResponse> {
        enrollment::update_progress(self, request, course_id, req).await
    }
}

pub(crate) async fn load_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<Course, HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err(not_found(ErrorCode::CourseNotFound, "课程不存在")),
        Err(e) => Err(internal_error("查询课程失败", e)),
    }
}

/// 查询课程并校验修改权限（授课讲师或管理员）
pub(crate) async fn load_owned_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    user: &User,
) -> Result<Course, HttpResponse> {
    let course = load_course(storage, course_id).await?;
    check_owner_or_admin(
        user,
        course.instructor_id,
        ErrorCode::CoursePermissionDenied,
        "只能管理自己的课程",
    )?;
    Ok(course)
}

pub(crate) async fn check_language_exists(
    storage: &Arc<dyn Storage>,
    language_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_language_by_id(language_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::LanguageNotFound, "语言不存在")),
        Err(e) => Err(internal_error("查询语言失败", e)),
    }
}

/// 学员只能看到已发布的课程
pub(crate) fn can_view(course: &Course, user: &User) -> bool {
    course.status == CourseStatus::Published || user.role.can_author()
}
