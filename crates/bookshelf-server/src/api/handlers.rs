use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bookshelf_core::{Book, BookId, BookStore, NewBook};
use serde::Serialize;

use super::{book_location, ApiError, AppState};

type ApiResult<T> = Result<T, ApiError>;

/// Run one store call on the blocking pool.
async fn with_store<T, F>(store: &Arc<dyn BookStore>, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn BookStore) -> bookshelf_core::Result<T> + Send + 'static,
{
    let store = Arc::clone(store);
    let value = tokio::task::spawn_blocking(move || f(store.as_ref())).await??;
    Ok(value)
}

fn book_id(path: Result<Path<BookId>, PathRejection>) -> ApiResult<BookId> {
    path.map(|Path(id)| id).map_err(|e| {
        tracing::debug!(error = %e, "rejected book id");
        ApiError::BadRequest
    })
}

/// Absent, `null` or malformed payloads are all a bad request.
fn parse_payload(body: &[u8]) -> ApiResult<NewBook> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest);
    }
    match serde_json::from_slice::<Option<NewBook>>(body) {
        Ok(Some(book)) => Ok(book),
        Ok(None) => Err(ApiError::BadRequest),
        Err(e) => {
            tracing::debug!(error = %e, "rejected book payload");
            Err(ApiError::BadRequest)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub books: usize,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let books = with_store(&state.store, |store| store.count()).await?;
    Ok(Json(HealthResponse { status: "ok", books }))
}

/// GET /api/books
pub async fn list_books(State(state): State<AppState>) -> ApiResult<Json<Vec<Book>>> {
    let books = with_store(&state.store, |store| store.list_all()).await?;
    Ok(Json(books))
}

/// GET /api/books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    path: Result<Path<BookId>, PathRejection>,
) -> ApiResult<Json<Book>> {
    let id = book_id(path)?;
    let book = with_store(&state.store, move |store| store.find_by_id(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(book))
}

/// POST /api/books
pub async fn create_book(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    let input = parse_payload(&body)?;
    let book = with_store(&state.store, move |store| store.insert(&input)).await?;
    tracing::info!(id = book.id, "book created");

    let location = book_location(book.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)).into_response())
}

/// PUT /api/books/{id}
pub async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<BookId>, PathRejection>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let id = book_id(path)?;
    let input = parse_payload(&body)?;

    let mut book = with_store(&state.store, move |store| store.find_by_id(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    book.apply(input);

    // The row can vanish between lookup and write; that is still a miss.
    if !with_store(&state.store, move |store| store.update(&book)).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, "book updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/books/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<BookId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = book_id(path)?;

    with_store(&state.store, move |store| store.find_by_id(id))
        .await?
        .ok_or(ApiError::NotFound)?;

    if !with_store(&state.store, move |store| store.remove_by_id(id)).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}
