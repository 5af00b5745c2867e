use axum::{
    Json,
    extract::{Path, State},
};
use bookstore_model::Book;

use crate::{
    errors::{AppError, AppResult},
    infra::app_state::AppState,
};

pub async fn list_genres_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.unit_of_work().catalog.distinct_genres().await?))
}

pub async fn books_by_genre_handler(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    Ok(Json(state.unit_of_work().books.list_by_genre(&genre).await?))
}

pub async fn list_authors_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.unit_of_work().catalog.distinct_authors().await?))
}

pub async fn books_by_author_handler(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    Ok(Json(state.unit_of_work().books.list_by_author(&author).await?))
}

pub async fn list_years_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<i32>>> {
    Ok(Json(state.unit_of_work().catalog.distinct_years().await?))
}

pub async fn books_by_year_handler(
    State(state): State<AppState>,
    Path(raw_year): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    let year: i32 = raw_year.trim().parse().map_err(|_| {
        AppError::bad_request(format!(
            "release_date must be an integer, got '{raw_year}'"
        ))
    })?;
    Ok(Json(state.unit_of_work().books.list_by_year(year).await?))
}
