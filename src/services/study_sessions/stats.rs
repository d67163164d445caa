use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Days, NaiveDate, Utc};
use std::collections::BTreeMap;

use super::StudySessionService;
use crate::models::ApiResponse;
use crate::models::study_sessions::{
    entities::StudySession,
    requests::StudyStatsParams,
    responses::{DailyStudyTotal, StudyStatsResponse},
};
use crate::services::{current_user, internal_error};

/// 最近 N 天（含今天，按 UTC 日期）的学习时长统计
pub async fn get_stats(
    service: &StudySessionService,
    request: &HttpRequest,
    query: StudyStatsParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let days = query.days();
    let today = Utc::now().date_naive();
    let first_day = window_start(today, days);
    let since = first_day.and_time(chrono::NaiveTime::MIN).and_utc();

    match storage.list_completed_study_sessions_since(user.id, since).await {
        Ok(sessions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summarize(&sessions, today, days),
            "查询成功",
        ))),
        Err(e) => Ok(internal_error("查询学习统计失败", e)),
    }
}

fn window_start(today: NaiveDate, days: i64) -> NaiveDate {
    today
        .checked_sub_days(Days::new((days - 1).max(0) as u64))
        .unwrap_or(today)
}

/// 按开始日期汇总，窗口内没有学习的日期记 0
pub fn summarize(sessions: &[StudySession], today: NaiveDate, days: i64) -> StudyStatsResponse {
    let first_day = window_start(today, days);

    let mut per_day: BTreeMap<NaiveDate, i64> = first_day
        .iter_days()
        .take_while(|d| *d <= today)
        .map(|d| (d, 0))
        .collect();

    let mut total_seconds = 0;
    let mut session_count = 0;
    for session in sessions {
        let Some(duration) = session.duration_seconds else {
            continue;
        };
        let day = session.started_at.date_naive();
        if let Some(total) = per_day.get_mut(&day) {
            *total += duration;
            total_seconds += duration;
            session_count += 1;
        }
    }

    StudyStatsResponse {
        days,
        total_seconds,
        session_count,
        daily: per_day
            .into_iter()
            .map(|(date, total_seconds)| DailyStudyTotal {
                date,
                total_seconds,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session(id: i64, started: (u32, u32), duration: Option<i64>) -> StudySession {
        let started_at = Utc
            .with_ymd_and_hms(2026, 3, started.0, started.1, 0, 0)
            .unwrap();
        StudySession {
            id,
            user_id: 1,
            course_id: None,
            language_id: None,
            started_at,
            ended_at: duration.map(|d| started_at + chrono::Duration::seconds(d)),
            duration_seconds: duration,
            notes: None,
        }
    }

    #[test]
    fn test_summarize_groups_by_day() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let sessions = vec![
            session(1, (8, 9), Some(600)),
            session(2, (10, 7), Some(1200)),
            session(3, (10, 20), Some(300)),
            session(4, (10, 21), None),
        ];

        let stats = summarize(&sessions, today, 3);
        assert_eq!(stats.days, 3);
        assert_eq!(stats.session_count, 3);
        assert_eq!(stats.total_seconds, 2100);
        assert_eq!(
            stats.daily,
            vec![
                DailyStudyTotal {
                    date: NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
                    total_seconds: 600,
                },
                DailyStudyTotal {
                    date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
                    total_seconds: 0,
                },
                DailyStudyTotal {
                    date: today,
                    total_seconds: 1500,
                },
            ]
        );
    }

    #[test]
    fn test_sessions_outside_window_ignored() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let stats = summarize(&[session(1, (1, 9), Some(900))], today, 7);
        assert_eq!(stats.total_seconds, 0);
        assert_eq!(stats.session_count, 0);
        assert_eq!(stats.daily.len(), 7);
    }

    #[test]
    fn test_single_day_window() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let stats = summarize(&[session(1, (10, 1), Some(60))], today, 1);
        assert_eq!(stats.daily.len(), 1);
        assert_eq!(stats.total_seconds, 60);
    }
}
