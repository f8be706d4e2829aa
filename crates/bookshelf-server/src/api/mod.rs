//! REST routes for `/api/books`.

mod error;
mod handlers;

pub use error::ApiError;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use bookshelf_core::{BookId, BookStore};
use tower_http::trace::TraceLayer;

pub const HEALTH: &str = "/health";
pub const BOOKS: &str = "/api/books";
pub const BOOK: &str = "/api/books/{id}";

/// Location of the Get-by-id route for `id`.
pub fn book_location(id: BookId) -> String {
    format!("{BOOKS}/{id}")
}

/// Shared state passed to handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookStore>,
}

impl AppState {
    pub fn new(store: impl BookStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH, get(handlers::health))
        .route(BOOKS, get(handlers::list_books).post(handlers::create_book))
        .route(
            BOOK,
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
