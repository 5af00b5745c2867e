//! Route table for the catalog API.

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::handlers::{books, catalog, reviews};
use crate::infra::app_state::AppState;

/// Path templates served by the API, shared with clients and tests.
pub mod paths {
    pub const NEW: &str = "/new";
    pub const BOOKS: &str = "/books";
    pub const BOOK: &str = "/books/{id}";
    pub const GENRES: &str = "/genres";
    pub const GENRE: &str = "/genres/{genre}";
    pub const AUTHORS: &str = "/authors";
    pub const AUTHOR: &str = "/authors/{author}";
    pub const YEARS: &str = "/years";
    pub const YEAR: &str = "/years/{release_date}";
    pub const EDIT: &str = "/edit/{id}";
    pub const DELETE: &str = "/delete/{id}";
    pub const REVIEW: &str = "/review/{id}";
    pub const AVERAGE_RATING: &str = "/average-rating/{id}";
    pub const PING: &str = "/ping";
    pub const HEALTH: &str = "/health";
}

pub mod utils {
    /// Substitute one `{param}` placeholder in a path template.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }
}

pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .route(paths::NEW, post(books::create_book_handler))
        .route(paths::BOOKS, get(books::list_books_handler))
        .route(paths::BOOK, get(books::get_book_handler))
        .route(paths::EDIT, put(books::update_book_handler))
        .route(paths::DELETE, delete(books::delete_book_handler))
        .route(paths::GENRES, get(catalog::list_genres_handler))
        .route(paths::GENRE, get(catalog::books_by_genre_handler))
        .route(paths::AUTHORS, get(catalog::list_authors_handler))
        .route(paths::AUTHOR, get(catalog::books_by_author_handler))
        .route(paths::YEARS, get(catalog::list_years_handler))
        .route(paths::YEAR, get(catalog::books_by_year_handler))
        .route(paths::REVIEW, post(reviews::add_review_handler))
        .route(paths::AVERAGE_RATING, get(reviews::average_rating_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_param_fills_placeholder() {
        assert_eq!(
            utils::replace_param(paths::AVERAGE_RATING, "{id}", "abc"),
            "/average-rating/abc"
        );
    }
}
