use actix_web::{http::header, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{render_export, search_majors, Matcher, RecommendResult, DEFAULT_SEARCH_LIMIT, EXPORT_FILENAME};
use crate::models::{
    DataSource, ErrorResponse, HealthResponse, MajorSearchQuery, MajorSearchResponse,
    RecommendRequest, RecommendResponse,
};
use crate::services::{CatalogSnapshot, CollegeCatalog};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CollegeCatalog>,
    pub matcher: Matcher,
    /// Result count when a request names none
    pub default_limit: u16,
    pub max_limit: u16,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route("/recommendations/export", web::post().to(export))
        .route("/majors", web::get().to(majors));
}

/// Health check endpoint
///
/// Never waits on the catalog: reports `loading` until the first load
/// finishes, and `degraded` when live acquisition failed and the bundled
/// data is being served instead.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, college_count, data_source) = match state.catalog.current().await {
        None => ("loading", 0, None),
        Some(snapshot) => {
            let status = if snapshot.error.is_some() { "degraded" } else { "healthy" };
            (status, snapshot.colleges.len(), Some(snapshot.source))
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        college_count,
        data_source,
    })
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Validate, load the catalog and rank it for the submitted profile
async fn rank(
    state: &AppState,
    req: &RecommendRequest,
) -> Result<(RecommendResult, CatalogSnapshot), HttpResponse> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return Err(validation_error(errors));
    }

    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit);
    let profile = req.to_profile();
    let snapshot = state.catalog.snapshot().await;

    let result = state
        .matcher
        .recommend(Some(snapshot.colleges.as_slice()), &profile, i64::from(limit));

    Ok((result, snapshot))
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "gpa": 3.6,
///   "sat": 1300,
///   "major": "Computer Science",
///   "location": "in-state",
///   "homeState": "OH",
///   "budget": "20k-50k",
///   "communityCollege": "no",
///   "institutionType": "any",
///   "limit": 10
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    let (result, snapshot) = match rank(&state, &req).await {
        Ok(ranked) => ranked,
        Err(response) => return response,
    };

    let data_source = if result.used_fallback {
        DataSource::Fallback
    } else {
        snapshot.source
    };

    tracing::info!(
        "Returning {} recommendations ({} eligible, source: {:?})",
        result.results.len(),
        result.eligible,
        data_source
    );

    HttpResponse::Ok().json(RecommendResponse {
        results: result.results,
        total_eligible: result.eligible,
        data_source,
    })
}

/// Plain-text export of the ranked list
///
/// POST /api/v1/recommendations/export
///
/// Takes the same body as the recommendations endpoint and answers with a
/// downloadable text file.
async fn export(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    let (result, _) = match rank(&state, &req).await {
        Ok(ranked) => ranked,
        Err(response) => return response,
    };

    let body = render_export(&result.results);

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
        ))
        .body(body)
}

/// Major search endpoint
///
/// GET /api/v1/majors?q={query}&limit={limit}
async fn majors(
    state: web::Data<AppState>,
    query: web::Query<MajorSearchQuery>,
) -> impl Responder {
    let q = query.q.as_deref().unwrap_or("");
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(usize::from(state.max_limit));

    let majors = search_majors(q, limit)
        .into_iter()
        .map(str::to_string)
        .collect();

    HttpResponse::Ok().json(MajorSearchResponse { majors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fallback_colleges;
    use crate::services::FetchOptions;
    use actix_web::{test, App};
    use std::time::Duration;

    fn offline_state() -> AppState {
        AppState {
            catalog: Arc::new(CollegeCatalog::new(
                None,
                FetchOptions::default(),
                Duration::from_secs(60),
            )),
            matcher: Matcher::default(),
            default_limit: 10,
            max_limit: 100,
        }
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(offline_state()))
                    .configure(crate::routes::configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health_does_not_wait_for_catalog() {
        let state = offline_state();
        let catalog = Arc::clone(&state.catalog);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "loading");
        assert_eq!(body.college_count, 0);
        assert_eq!(body.data_source, None);
        assert!(catalog.current().await.is_none());

        catalog.snapshot().await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.data_source, Some(DataSource::Fallback));
        assert_eq!(body.college_count, fallback_colleges().len());
    }

    #[actix_web::test]
    async fn test_configured_default_limit_applies() {
        let state = AppState {
            default_limit: 3,
            ..offline_state()
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/recommendations")
            .set_json(serde_json::json!({ "gpa": 3.7 }))
            .to_request();
        let body: RecommendResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.results.len(), 3);

        let req = test::TestRequest::post()
            .uri("/api/v1/recommendations")
            .set_json(serde_json::json!({ "gpa": 3.7, "limit": 6 }))
            .to_request();
        let body: RecommendResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.results.len(), 6);
    }

    #[actix_web::test]
    async fn test_recommend_returns_ranked_results() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/recommendations")
            .set_json(serde_json::json!({ "gpa": 3.7, "sat": 1350, "limit": 5 }))
            .to_request();
        let body: RecommendResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.results.len(), 5);
        assert!(body.total_eligible >= 5);
        assert_eq!(body.data_source, DataSource::Fallback);
        assert!(body.results.iter().all(|r| !r.labels.location.is_empty()));
        for pair in body.results.windows(2) {
            assert!(pair[0].fit_score >= pair[1].fit_score);
        }
    }

    #[actix_web::test]
    async fn test_recommend_rejects_missing_academics() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/recommendations")
            .set_json(serde_json::json!({ "major": "History" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.status_code, 400);
    }

    #[actix_web::test]
    async fn test_export_is_text_attachment() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/recommendations/export")
            .set_json(serde_json::json!({ "gpa": 3.9, "limit": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(disposition.contains(EXPORT_FILENAME));

        let body = test::read_body(resp).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("College Picker"));
        assert_eq!(text.lines().filter(|l| l.contains("% fit")).count(), 3);
        assert!(text.ends_with("College Picker"));
    }

    #[actix_web::test]
    async fn test_major_search() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/majors?q=engineering&limit=3")
            .to_request();
        let body: MajorSearchResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.majors.len(), 3);
        assert!(body
            .majors
            .iter()
            .all(|m| m.to_lowercase().contains("engineering")));
    }
}
