use thiserror::Error;

use crate::models::BookId;

/// All errors that can occur in bookshelf-core.
#[derive(Debug, Error)]
pub enum BookshelfError {
    #[error("Book not found: {0}")]
    BookNotFound(BookId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, BookshelfError>;
