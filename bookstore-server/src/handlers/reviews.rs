use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use bookstore_model::{AverageRating, Review};

use super::StatusMessage;
use crate::{errors::AppResult, infra::app_state::AppState};

pub async fn add_review_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Review>, JsonRejection>,
) -> AppResult<Json<StatusMessage>> {
    let Json(review) = payload?;
    state.unit_of_work().reviews.add_review(&id, review).await?;
    Ok(Json(StatusMessage::new("Review added successfully")))
}

pub async fn average_rating_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AverageRating>> {
    let average = state.unit_of_work().reviews.average_rating(&id).await?;
    Ok(Json(average))
}
