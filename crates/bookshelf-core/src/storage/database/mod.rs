mod connection;
mod migrations;
mod schema;

pub use connection::ConnectionPool;
pub use migrations::{get_applied_versions, run_migrations, Migration};
pub use schema::{create_tables, SCHEMA_VERSION};

use std::path::Path;

use crate::error::{BookshelfError, Result};
use crate::models::{seed_books, Book, BookId, NewBook};

use super::repositories::{BookRepository, Repository, SqliteBookRepository};
use super::BookStore;

pub fn open_database(path: &Path) -> Result<ConnectionPool> {
    let pool = ConnectionPool::open(path)?;
    {
        let conn = pool.get_connection();
        migrations::run_migrations(&conn)?;
    }
    Ok(pool)
}

pub fn open_in_memory() -> Result<ConnectionPool> {
    let pool = ConnectionPool::open_in_memory()?;
    {
        let conn = pool.get_connection();
        migrations::run_migrations(&conn)?;
    }
    Ok(pool)
}

/// SQLite-backed [`BookStore`].
pub struct Database {
    pool: ConnectionPool,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let pool = open_database(path)?;
        tracing::info!(path = %path.display(), "database opened");
        Ok(Self { pool })
    }

    pub fn open_in_memory() -> Result<Self> {
        let pool = open_in_memory()?;
        tracing::info!("in-memory database opened");
        Ok(Self { pool })
    }

    pub fn path(&self) -> Option<&str> {
        self.pool.path()
    }

    pub fn close(self) -> Result<()> {
        self.pool.close()
    }

    /// Like [`BookStore::find_by_id`], but absence is an error.
    pub fn get_book(&self, id: BookId) -> Result<Book> {
        self.find_by_id(id)?.ok_or(BookshelfError::BookNotFound(id))
    }

    /// Insert the default records into a fresh store. Returns how many were inserted.
    ///
    /// A store that has ever issued an id is left alone, even if it is empty
    /// now, so seeding never hands out a deleted id again.
    pub fn seed_defaults(&self) -> Result<usize> {
        self.with_transaction(|repo| {
            if repo.count()? > 0 || repo.last_issued_id()?.is_some() {
                return Ok(0);
            }
            let seeds = seed_books();
            for book in &seeds {
                repo.insert_with_id(book)?;
            }
            Ok(seeds.len())
        })
    }

    /// Run `f` inside a transaction; committing it is the persist step.
    fn with_transaction<T>(
        &self,
        f: impl FnOnce(&SqliteBookRepository<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut conn = self.pool.get_connection();
        let tx = conn.transaction()?;
        let out = f(&SqliteBookRepository::new(&tx))?;
        tx.commit()?;
        Ok(out)
    }
}

impl BookStore for Database {
    fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        let conn = self.pool.get_connection();
        SqliteBookRepository::new(&conn).find_by_id(&id)
    }

    fn list_all(&self) -> Result<Vec<Book>> {
        let conn = self.pool.get_connection();
        SqliteBookRepository::new(&conn).list_all()
    }

    fn insert(&self, book: &NewBook) -> Result<Book> {
        self.with_transaction(|repo| repo.insert(book))
    }

    fn update(&self, book: &Book) -> Result<bool> {
        self.with_transaction(|repo| repo.update(book))
    }

    fn remove_by_id(&self, id: BookId) -> Result<bool> {
        self.with_transaction(|repo| repo.delete(&id))
    }

    fn count(&self) -> Result<usize> {
        let conn = self.pool.get_connection();
        SqliteBookRepository::new(&conn).count()
    }
}
