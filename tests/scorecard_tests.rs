// College Scorecard client tests against a mock HTTP server

use college_picker::models::DataSource;
use college_picker::services::{
    CancelFlag, CollegeCatalog, FetchOptions, ScorecardClient, ScorecardError,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn options(per_page: u32, max_pages: u32) -> FetchOptions {
    FetchOptions {
        per_page,
        max_pages,
        max_retries: 2,
        backoff: Duration::ZERO,
    }
}

fn client_for(server: &mockito::ServerGuard) -> ScorecardClient {
    ScorecardClient::new(
        format!("{}/schools", server.url()),
        "test-key".to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn school(name: &str, sat_math: u32) -> serde_json::Value {
    json!({
        "id": 1,
        "school.name": name,
        "school.state": "OH",
        "school.ownership": 1,
        "school.degrees_awarded.predominant": 3,
        "latest.admissions.admission_rate.overall": 0.42,
        "latest.admissions.sat_scores.midpoint.critical_reading": 600,
        "latest.admissions.sat_scores.midpoint.math": sat_math,
        "latest.cost.avg_net_price.public": 17000
    })
}

fn page_body(schools: Vec<serde_json::Value>) -> String {
    json!({ "metadata": { "total": 3 }, "results": schools }).to_string()
}

fn page_query(page: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("page".into(), page.into()),
        Matcher::UrlEncoded("api_key".into(), "test-key".into()),
    ])
}

#[tokio::test]
async fn test_fetch_pages_until_short_page() {
    let mut server = mockito::Server::new_async().await;

    let first = server
        .mock("GET", "/schools")
        .match_query(page_query("0"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(vec![school("Alpha University", 610), school("Beta College", 620)]))
        .expect(1)
        .create_async()
        .await;

    let second = server
        .mock("GET", "/schools")
        .match_query(page_query("1"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(vec![school("Gamma Institute", 630)]))
        .expect(1)
        .create_async()
        .await;

    let colleges = client_for(&server)
        .fetch_colleges(&options(2, 10), &CancelFlag::new())
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;

    let names: Vec<&str> = colleges.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha University", "Beta College", "Gamma Institute"]);
    assert_eq!(colleges[0].avg_sat, Some(1210.0));
    assert_eq!(colleges[0].acceptance_rate, Some(42.0));
}

#[tokio::test]
async fn test_fetch_stops_at_page_cap() {
    let mut server = mockito::Server::new_async().await;

    let first = server
        .mock("GET", "/schools")
        .match_query(page_query("0"))
        .with_status(200)
        .with_body(page_body(vec![school("Alpha University", 610), school("Beta College", 620)]))
        .expect(1)
        .create_async()
        .await;

    let colleges = client_for(&server)
        .fetch_colleges(&options(2, 1), &CancelFlag::new())
        .await
        .unwrap();

    first.assert_async().await;
    assert_eq!(colleges.len(), 2);
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let mut server = mockito::Server::new_async().await;

    let failing = server
        .mock("GET", "/schools")
        .match_query(page_query("0"))
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let succeeding = server
        .mock("GET", "/schools")
        .match_query(page_query("0"))
        .with_status(200)
        .with_body(page_body(vec![school("Alpha University", 610)]))
        .expect(1)
        .create_async()
        .await;

    let colleges = client_for(&server)
        .fetch_colleges(&options(20, 10), &CancelFlag::new())
        .await
        .unwrap();

    failing.assert_async().await;
    succeeding.assert_async().await;
    assert_eq!(colleges.len(), 1);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let mut server = mockito::Server::new_async().await;

    let failing = server
        .mock("GET", "/schools")
        .match_query(Matcher::Any)
        .with_status(500)
        .expect(3)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_colleges(&options(20, 10), &CancelFlag::new())
        .await
        .unwrap_err();

    failing.assert_async().await;
    assert!(matches!(err, ScorecardError::ApiError { status } if status.as_u16() == 500));
}

#[tokio::test]
async fn test_other_errors_are_not_retried() {
    let mut server = mockito::Server::new_async().await;

    let forbidden = server
        .mock("GET", "/schools")
        .match_query(Matcher::Any)
        .with_status(403)
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_colleges(&options(20, 10), &CancelFlag::new())
        .await
        .unwrap_err();

    forbidden.assert_async().await;
    assert!(matches!(err, ScorecardError::ApiError { status } if status.as_u16() == 403));
}

#[tokio::test]
async fn test_cancelled_fetch_makes_no_requests() {
    let mut server = mockito::Server::new_async().await;

    let untouched = server
        .mock("GET", "/schools")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(page_body(vec![]))
        .expect(0)
        .create_async()
        .await;

    let cancel = CancelFlag::new();
    cancel.cancel();

    let err = client_for(&server)
        .fetch_colleges(&options(20, 10), &cancel)
        .await
        .unwrap_err();

    untouched.assert_async().await;
    assert!(matches!(err, ScorecardError::Cancelled));
}

#[tokio::test]
async fn test_cancel_between_pages_discards_fetched_pages() {
    let mut server = mockito::Server::new_async().await;
    let cancel = CancelFlag::new();

    // Page 0 is served in full, then the sequence is abandoned
    let raise = cancel.clone();
    let first = server
        .mock("GET", "/schools")
        .match_query(page_query("0"))
        .with_status(200)
        .with_body_from_request(move |_| {
            raise.cancel();
            page_body(vec![school("Alpha University", 610), school("Beta College", 620)]).into_bytes()
        })
        .expect(1)
        .create_async()
        .await;

    let second = server
        .mock("GET", "/schools")
        .match_query(page_query("1"))
        .with_status(200)
        .with_body(page_body(vec![school("Gamma Institute", 630)]))
        .expect(0)
        .create_async()
        .await;

    let result = client_for(&server)
        .fetch_colleges(&options(2, 10), &cancel)
        .await;

    first.assert_async().await;
    second.assert_async().await;
    assert!(matches!(result, Err(ScorecardError::Cancelled)));
}

#[tokio::test]
async fn test_records_without_usable_data_are_dropped() {
    let mut server = mockito::Server::new_async().await;

    let _page = server
        .mock("GET", "/schools")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(page_body(vec![
            school("Alpha University", 610),
            json!({ "id": 2, "school.name": "Bare Record" }),
        ]))
        .create_async()
        .await;

    let colleges = client_for(&server)
        .fetch_colleges(&options(20, 10), &CancelFlag::new())
        .await
        .unwrap();

    assert_eq!(colleges.len(), 1);
    assert_eq!(colleges[0].name, "Alpha University");
}

#[tokio::test]
async fn test_catalog_serves_live_colleges() {
    let mut server = mockito::Server::new_async().await;

    let _page = server
        .mock("GET", "/schools")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(page_body(vec![school("Alpha University", 610)]))
        .create_async()
        .await;

    let catalog = CollegeCatalog::new(
        Some(client_for(&server)),
        options(20, 10),
        Duration::from_secs(60),
    );
    let snapshot = catalog.snapshot().await;

    assert_eq!(snapshot.source, DataSource::Live);
    assert_eq!(snapshot.colleges.len(), 1);
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn test_catalog_falls_back_on_error() {
    let mut server = mockito::Server::new_async().await;

    let _down = server
        .mock("GET", "/schools")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let catalog = CollegeCatalog::new(
        Some(client_for(&server)),
        options(20, 10),
        Duration::from_secs(60),
    );
    let snapshot = catalog.snapshot().await;

    assert_eq!(snapshot.source, DataSource::Fallback);
    assert!(!snapshot.colleges.is_empty());
    assert!(snapshot.error.is_some());
}

#[tokio::test]
async fn test_catalog_falls_back_on_empty_results() {
    let mut server = mockito::Server::new_async().await;

    let _empty = server
        .mock("GET", "/schools")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(page_body(vec![]))
        .create_async()
        .await;

    let catalog = CollegeCatalog::new(
        Some(client_for(&server)),
        options(20, 10),
        Duration::from_secs(60),
    );
    let snapshot = catalog.snapshot().await;

    assert_eq!(snapshot.source, DataSource::Fallback);
    assert!(snapshot.error.is_some());
}

#[tokio::test]
async fn test_catalog_cancel_mid_load_serves_fallback() {
    let mut server = mockito::Server::new_async().await;

    let catalog = Arc::new(CollegeCatalog::new(
        Some(client_for(&server)),
        options(2, 10),
        Duration::from_secs(60),
    ));

    let cancelling = Arc::clone(&catalog);
    let _first = server
        .mock("GET", "/schools")
        .match_query(page_query("0"))
        .with_status(200)
        .with_body_from_request(move |_| {
            cancelling.cancel();
            page_body(vec![school("Alpha University", 610), school("Beta College", 620)]).into_bytes()
        })
        .create_async()
        .await;

    let second = server
        .mock("GET", "/schools")
        .match_query(page_query("1"))
        .with_status(200)
        .with_body(page_body(vec![school("Gamma Institute", 630)]))
        .expect(0)
        .create_async()
        .await;

    let snapshot = catalog.snapshot().await;

    second.assert_async().await;
    assert_eq!(snapshot.source, DataSource::Fallback);
    assert!(snapshot.colleges.iter().all(|c| c.name != "Alpha University"));
    assert!(snapshot
        .error
        .as_deref()
        .is_some_and(|e| e.to_lowercase().contains("cancelled")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_refresh_abort_discards_load_and_next_load_succeeds() {
    let mut server = mockito::Server::new_async().await;

    let (arrived_tx, arrived_rx) = tokio::sync::oneshot::channel::<()>();
    let arrived = Mutex::new(Some(arrived_tx));

    let page = server
        .mock("GET", "/schools")
        .match_query(page_query("0"))
        .with_status(200)
        .with_body_from_request(move |_| {
            if let Some(tx) = arrived.lock().unwrap().take() {
                let _ = tx.send(());
            }
            // Keep the first response in flight long enough to abort it
            std::thread::sleep(Duration::from_millis(200));
            page_body(vec![school("Alpha University", 610)]).into_bytes()
        })
        .expect(2)
        .create_async()
        .await;

    let catalog = Arc::new(CollegeCatalog::new(
        Some(client_for(&server)),
        options(20, 10),
        Duration::from_secs(60),
    ));

    let handle = catalog.spawn_refresh();
    arrived_rx.await.unwrap();
    handle.abort();

    // Nothing from the abandoned load is cached
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(catalog.current().await.is_none());

    // Cancellation is per load: a later load still goes live
    let snapshot = catalog.snapshot().await;
    page.assert_async().await;
    assert_eq!(snapshot.source, DataSource::Live);
    assert_eq!(snapshot.colleges.len(), 1);
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn test_catalog_cancel_without_load_does_not_stick() {
    let mut server = mockito::Server::new_async().await;

    let _page = server
        .mock("GET", "/schools")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(page_body(vec![school("Alpha University", 610)]))
        .create_async()
        .await;

    let catalog = CollegeCatalog::new(
        Some(client_for(&server)),
        options(20, 10),
        Duration::from_secs(60),
    );

    catalog.cancel();
    let snapshot = catalog.snapshot().await;

    assert_eq!(snapshot.source, DataSource::Live);
}
