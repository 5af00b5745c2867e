use bookstore_server::routes::paths;
use serde_json::Value;

mod common;
use common::build_test_app;

#[tokio::test]
async fn ping_reports_version() {
    let app = build_test_app();
    let response = app.server.get(paths::PING).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_checks_the_store() {
    let app = build_test_app();
    let response = app.server.get(paths::HEALTH).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["backend"], "memory");
}
