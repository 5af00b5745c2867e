use axum::http::StatusCode;
use bookstore_server::routes::{paths, utils::replace_param};
use serde_json::{Value, json};

mod common;
use common::{book_json, build_test_app, create_book};

#[tokio::test]
async fn create_then_fetch_round_trips() {
    let app = build_test_app();
    let id = create_book(
        &app.server,
        book_json("Dune", "Frank Herbert", "Sci-Fi", 1965),
    )
    .await;

    let response = app.server.get(&replace_param(paths::BOOK, "{id}", &id)).await;
    response.assert_status_ok();
    let book: Value = response.json();
    assert_eq!(
        book,
        json!({
            "_id": id,
            "book_name": "Dune",
            "author": "Frank Herbert",
            "genre": "Sci-Fi",
            "release_date": 1965,
            "stock_count": 1,
        })
    );
}

#[tokio::test]
async fn duplicate_name_is_a_conflict() {
    let app = build_test_app();
    create_book(&app.server, book_json("Dune", "Frank Herbert", "Sci-Fi", 1965))
        .await;

    let response = app
        .server
        .post(paths::NEW)
        .json(&book_json("Dune", "Imposter", "Parody", 2020))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Dune"));
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let app = build_test_app();
    let response = app
        .server
        .post(paths::NEW)
        .content_type("application/json")
        .bytes("{ not json".into())
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());

    let response = app
        .server
        .post(paths::NEW)
        .json(&json!({ "book_name": "Dune", "release_date": "1965" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let app = build_test_app();

    let response = app.server.get("/books/not-an-id").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = app
        .server
        .get(&replace_param(paths::BOOK, "{id}", "65f1c0ffee0000000000beef"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn list_returns_every_book() {
    let app = build_test_app();
    let response = app.server.get(paths::BOOKS).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));

    create_book(&app.server, book_json("Dune", "Frank Herbert", "Sci-Fi", 1965))
        .await;
    create_book(&app.server, book_json("Emma", "Jane Austen", "Romance", 1815))
        .await;

    let books: Vec<Value> = app.server.get(paths::BOOKS).await.json();
    assert_eq!(books.len(), 2);
}

#[tokio::test]
async fn edit_changes_only_supplied_fields() {
    let app = build_test_app();
    let id = create_book(
        &app.server,
        book_json("Dune", "Frank Herbert", "Sci-Fi", 1965),
    )
    .await;

    let response = app
        .server
        .put(&replace_param(paths::EDIT, "{id}", &id))
        .json(&json!({ "genre": "Space Opera", "author": "" }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Book updated successfully" })
    );

    let book: Value = app
        .server
        .get(&replace_param(paths::BOOK, "{id}", &id))
        .await
        .json();
    assert_eq!(book["genre"], "Space Opera");
    assert_eq!(book["author"], "Frank Herbert");
    assert_eq!(book["release_date"], 1965);
}

#[tokio::test]
async fn edit_of_missing_book_is_not_found() {
    let app = build_test_app();
    let response = app
        .server
        .put(&replace_param(paths::EDIT, "{id}", "65f1c0ffee0000000000beef"))
        .json(&json!({ "genre": "Horror" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_book() {
    let app = build_test_app();
    let id = create_book(
        &app.server,
        book_json("Dune", "Frank Herbert", "Sci-Fi", 1965),
    )
    .await;
    let path = replace_param(paths::DELETE, "{id}", &id);

    let response = app.server.delete(&path).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Book deleted successfully" })
    );

    app.server
        .get(&replace_param(paths::BOOK, "{id}", &id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}
