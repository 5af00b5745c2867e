use std::sync::Arc;

use axum_test::TestServer;
use bookstore_config::{Config, StoreBackend};
use bookstore_core::{application::AppUnitOfWork, database::InMemoryBookStore};
use bookstore_server::{AppState, create_app};
use serde_json::{Value, json};

// Code is used by test modules, but not in every one of them
#[allow(unused)]
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryBookStore>,
}

#[allow(unused)]
pub fn build_test_app() -> TestApp {
    let store = Arc::new(InMemoryBookStore::new());
    let config = Config {
        store: StoreBackend::Memory,
        dev_mode: true,
        ..Config::default()
    };
    let state = AppState::new(AppUnitOfWork::new(store.clone()), config);
    let server = TestServer::new(create_app(state)).expect("test server");
    TestApp { server, store }
}

#[allow(unused)]
pub fn book_json(name: &str, author: &str, genre: &str, year: i32) -> Value {
    json!({
        "book_name": name,
        "author": author,
        "genre": genre,
        "release_date": year,
        "stock_count": 1,
    })
}

/// Create a book through the API and return its id.
#[allow(unused)]
pub async fn create_book(server: &TestServer, body: Value) -> String {
    let response = server
        .post(bookstore_server::routes::paths::NEW)
        .json(&body)
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let created: Value = response.json();
    created["_id"]
        .as_str()
        .expect("created book carries an id")
        .to_string()
}
