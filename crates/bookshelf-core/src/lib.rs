pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use config::{AppConfig, DatabaseConfig, LoggingConfig, ServerConfig};
pub use error::{BookshelfError, Result};
pub use models::*;

pub use storage::BookStore;
pub use storage::database::{ConnectionPool, Database, open_database, open_in_memory};
pub use storage::repositories::{BookRepository, Repository, SqliteBookRepository};
