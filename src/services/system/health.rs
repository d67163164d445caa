use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use tracing::warn;

use super::SystemService;
use crate::models::{ApiResponse, AppStartTime, system::responses::HealthResponse};

/// 健康检查：版本、运行时长与数据库连通性
pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let storage = service.get_storage(request);
    let now = Utc::now();

    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|t| t.start_datetime)
        .unwrap_or(now);

    let status = match storage.count_users().await {
        Ok(_) => "ok",
        Err(e) => {
            warn!("Health check failed to reach the database: {e}");
            "degraded"
        }
    };

    let response = HealthResponse {
        status: status.to_string(),
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        started_at,
        uptime_seconds: uptime_seconds(started_at, now),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is running")))
}

fn uptime_seconds(started_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - started_at).num_seconds().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_seconds() {
        let now = Utc::now();
        assert_eq!(uptime_seconds(now - chrono::Duration::seconds(90), now), 90);
        assert_eq!(uptime_seconds(now + chrono::Duration::seconds(5), now), 0);
    }
}
