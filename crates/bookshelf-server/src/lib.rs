//! Bookshelf server — axum REST API over a [`BookStore`](bookshelf_core::BookStore).

pub mod api;
pub mod server;

pub use api::{router, ApiError, AppState};
pub use server::{serve, start, ServerHandle};
