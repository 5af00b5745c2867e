use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use bookstore_model::{Book, BookPatch};
use tracing::info;

use super::StatusMessage;
use crate::{errors::AppResult, infra::app_state::AppState};

pub async fn create_book_handler(
    State(state): State<AppState>,
    payload: Result<Json<Book>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let Json(book) = payload?;
    let created = state.unit_of_work().books.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_books_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.unit_of_work().books.list_all().await?;
    Ok(Json(books))
}

pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.unit_of_work().books.get_by_id(&id).await?;
    Ok(Json(book))
}

pub async fn update_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookPatch>, JsonRejection>,
) -> AppResult<Json<StatusMessage>> {
    let Json(patch) = payload?;
    state.unit_of_work().books.update(&id, &patch).await?;
    Ok(Json(StatusMessage::new("Book updated successfully")))
}

pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<StatusMessage>> {
    state.unit_of_work().books.delete(&id).await?;
    info!(book_id = %id, "delete request completed");
    Ok(Json(StatusMessage::new("Book deleted successfully")))
}
