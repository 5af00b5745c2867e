use axum::http::StatusCode;
use bookstore_server::routes::{paths, utils::replace_param};
use serde_json::{Value, json};

mod common;
use common::{book_json, build_test_app, create_book};

#[tokio::test]
async fn average_rating_follows_reviews() {
    let app = build_test_app();
    let id = create_book(
        &app.server,
        book_json("Dune", "Frank Herbert", "Sci-Fi", 1965),
    )
    .await;
    let average_path = replace_param(paths::AVERAGE_RATING, "{id}", &id);
    let review_path = replace_param(paths::REVIEW, "{id}", &id);

    let response = app.server.get(&average_path).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "averageRating": 0.0 }));

    for (rating, text) in [(4, "good"), (2, "slow start")] {
        let response = app
            .server
            .post(&review_path)
            .json(&json!({ "rating": rating, "review": text }))
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Review added successfully" })
        );
    }

    let response = app.server.get(&average_path).await;
    assert_eq!(response.json::<Value>(), json!({ "averageRating": 3.0 }));

    let book: Value = app
        .server
        .get(&replace_param(paths::BOOK, "{id}", &id))
        .await
        .json();
    assert_eq!(
        book["reviews"],
        json!([
            { "rating": 4, "review": "good" },
            { "rating": 2, "review": "slow start" },
        ])
    );
}

#[tokio::test]
async fn out_of_range_rating_is_rejected() {
    let app = build_test_app();
    let id = create_book(
        &app.server,
        book_json("Dune", "Frank Herbert", "Sci-Fi", 1965),
    )
    .await;

    let response = app
        .server
        .post(&replace_param(paths::REVIEW, "{id}", &id))
        .json(&json!({ "rating": 6, "review": "too good" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reviews_for_unknown_books_are_not_found() {
    let app = build_test_app();
    let missing = "65f1c0ffee0000000000beef";

    app.server
        .post(&replace_param(paths::REVIEW, "{id}", missing))
        .json(&json!({ "rating": 3 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&replace_param(paths::AVERAGE_RATING, "{id}", "bogus"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
