use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{
    CourseListParams, CreateCourseRequest, UpdateCourseRequest, UpdateProgressRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeIDI64;

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(&req, body.into_inner()).await
}

pub async fn get_course(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, path.0).await
}

pub async fn update_course(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, path.0).await
}

pub async fn enroll(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.enroll(&req, path.0).await
}

pub async fn unenroll(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.unenroll(&req, path.0).await
}

pub async fn list_enrolled(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_enrolled(&req).await
}

pub async fn update_progress(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateProgressRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_progress(&req, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 课程列表 - 所有登录用户（学员只看到已发布课程）
                    .route(web::get().to(list_courses))
                    // 创建课程 - 讲师和管理员
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            // 已选课程
            .service(web::resource("/enrolled").route(web::get().to(list_enrolled)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_course))
                    // 更新、删除 - 讲师和管理员，业务层校验所有者
                    .route(
                        web::put()
                            .to(update_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/enroll")
                    .route(web::post().to(enroll))
                    .route(web::delete().to(unenroll)),
            )
            .service(web::resource("/{id}/progress").route(web::put().to(update_progress))),
    );
}
