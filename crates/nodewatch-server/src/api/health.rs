//! Health endpoint
//!
//! GET /health - build metadata and process start time

use actix_web::{HttpResponse, Responder, get, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Build metadata reported by the health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: String,
    pub commit: String,
    pub date: String,
}

impl BuildInfo {
    /// Commit and date are taken from `NODEWATCH_BUILD_COMMIT` and
    /// `NODEWATCH_BUILD_DATE` at compile time when set
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("NODEWATCH_BUILD_COMMIT")
                .unwrap_or("unknown")
                .to_string(),
            date: option_env!("NODEWATCH_BUILD_DATE")
                .unwrap_or("unknown")
                .to_string(),
        }
    }
}

/// Shared state behind the health endpoint
#[derive(Debug, Clone)]
pub struct HealthState {
    pub build_info: BuildInfo,
    pub started_at: DateTime<Utc>,
}

impl HealthState {
    pub fn new(build_info: BuildInfo) -> Self {
        Self {
            build_info,
            started_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse<'a> {
    build_info: &'a BuildInfo,
    started_at: String,
}

#[get("/health")]
pub async fn health(data: web::Data<HealthState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        build_info: &data.build_info,
        started_at: data.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use chrono::TimeZone;

    fn state() -> HealthState {
        HealthState {
            build_info: BuildInfo {
                version: "1.2.3".to_string(),
                commit: "abc123".to_string(),
                date: "2026-01-01".to_string(),
            },
            started_at: Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap(),
        }
    }

    #[actix_web::test]
    async fn test_health_reports_build_info_and_start_time() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .service(health),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["build_info"]["version"], "1.2.3");
        assert_eq!(body["build_info"]["commit"], "abc123");
        assert_eq!(body["build_info"]["date"], "2026-01-01");
        assert_eq!(body["started_at"], "2026-03-04T05:06:07Z");
    }

    #[actix_web::test]
    async fn test_health_rejects_other_methods() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .service(health),
        )
        .await;

        let req = test::TestRequest::post().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(!resp.status().is_success());
    }

    #[::core::prelude::v1::test]
    fn test_build_info_version_matches_package() {
        assert_eq!(BuildInfo::current().version, env!("CARGO_PKG_VERSION"));
    }
}
