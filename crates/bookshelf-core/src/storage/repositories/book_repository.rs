use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::models::{Book, BookId, NewBook};

use super::Repository;

pub trait BookRepository: Repository<Entity = Book, Id = BookId> {
    fn list_all(&self) -> Result<Vec<Book>>;
    /// Insert a record and return it with its store-assigned id.
    fn insert(&self, book: &NewBook) -> Result<Book>;
    /// Insert a record under an explicit id. Used for seeding.
    fn insert_with_id(&self, book: &Book) -> Result<()>;
    fn count(&self) -> Result<usize>;
    /// Highest id the store has ever handed out, even if since deleted.
    fn last_issued_id(&self) -> Result<Option<BookId>>;
}

/// Book repository over a borrowed connection or open transaction.
pub struct SqliteBookRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteBookRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn row_to_book(row: &rusqlite::Row) -> rusqlite::Result<Book> {
        Ok(Book {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            year_published: row.get(3)?,
        })
    }
}

impl<'a> Repository for SqliteBookRepository<'a> {
    type Entity = Book;
    type Id = BookId;

    fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::Entity>> {
        let book = self
            .conn
            .query_row(
                "SELECT id, title, author, year_published FROM books WHERE id = ?1",
                params![id],
                Self::row_to_book,
            )
            .optional()?;
        Ok(book)
    }

    fn update(&self, book: &Self::Entity) -> Result<bool> {
        let updated = self.conn.execute(
            "UPDATE books SET title = ?1, author = ?2, year_published = ?3 WHERE id = ?4",
            params![book.title, book.author, book.year_published, book.id],
        )?;
        Ok(updated > 0)
    }

    fn delete(&self, id: &Self::Id) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

impl<'a> BookRepository for SqliteBookRepository<'a> {
    fn list_all(&self) -> Result<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, author, year_published FROM books ORDER BY id")?;

        let rows = stmt
            .query_map([], Self::row_to_book)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn insert(&self, book: &NewBook) -> Result<Book> {
        self.conn.execute(
            "INSERT INTO books (title, author, year_published) VALUES (?1, ?2, ?3)",
            params![book.title, book.author, book.year_published],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(book.clone().into_book(id))
    }

    fn insert_with_id(&self, book: &Book) -> Result<()> {
        self.conn.execute(
            "INSERT INTO books (id, title, author, year_published) VALUES (?1, ?2, ?3, ?4)",
            params![book.id, book.title, book.author, book.year_published],
        )?;
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn last_issued_id(&self) -> Result<Option<BookId>> {
        let seq = self
            .conn
            .query_row(
                "SELECT seq FROM sqlite_sequence WHERE name = 'books'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::{run_migrations, SCHEMA_VERSION};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_schema_version_recorded() {
        let conn = setup();
        let versions = crate::storage::database::get_applied_versions(&conn).unwrap();
        assert_eq!(versions, vec![SCHEMA_VERSION]);
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let conn = setup();
        let repo = SqliteBookRepository::new(&conn);

        let a = repo.insert(&NewBook::new("A", "Author A", 2001)).unwrap();
        let b = repo.insert(&NewBook::new("B", "Author B", 2002)).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let conn = setup();
        let repo = SqliteBookRepository::new(&conn);

        let a = repo.insert(&NewBook::new("A", "X", 1)).unwrap();
        let b = repo.insert(&NewBook::new("B", "X", 2)).unwrap();
        assert!(repo.delete(&b.id).unwrap());

        let c = repo.insert(&NewBook::new("C", "X", 3)).unwrap();
        assert_ne!(c.id, a.id);
        assert_ne!(c.id, b.id);
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_insert_with_id_advances_sequence() {
        let conn = setup();
        let repo = SqliteBookRepository::new(&conn);

        repo.insert_with_id(&NewBook::new("Seed", "S", 1900).into_book(5)).unwrap();
        let next = repo.insert(&NewBook::new("Next", "N", 2000)).unwrap();
        assert_eq!(next.id, 6);
    }

    #[test]
    fn test_last_issued_id_survives_delete() {
        let conn = setup();
        let repo = SqliteBookRepository::new(&conn);
        assert_eq!(repo.last_issued_id().unwrap(), None);

        let a = repo.insert(&NewBook::new("A", "X", 1)).unwrap();
        assert!(repo.delete(&a.id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
        assert_eq!(repo.last_issued_id().unwrap(), Some(a.id));
    }

    #[test]
    fn test_find_by_id_missing() {
        let conn = setup();
        let repo = SqliteBookRepository::new(&conn);
        assert!(repo.find_by_id(&999).unwrap().is_none());
    }

    #[test]
    fn test_update_missing_row_returns_false() {
        let conn = setup();
        let repo = SqliteBookRepository::new(&conn);
        let ghost = NewBook::new("Ghost", "Nobody", 0).into_book(42);
        assert!(!repo.update(&ghost).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_list_all_in_id_order() {
        let conn = setup();
        let repo = SqliteBookRepository::new(&conn);
        repo.insert_with_id(&NewBook::new("Third", "", 3).into_book(3)).unwrap();
        repo.insert_with_id(&NewBook::new("First", "", 1).into_book(1)).unwrap();
        repo.insert(&NewBook::new("Fourth", "", 4)).unwrap();

        let titles: Vec<String> = repo.list_all().unwrap().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["First", "Third", "Fourth"]);
    }
}
