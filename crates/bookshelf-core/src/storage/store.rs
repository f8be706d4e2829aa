use crate::error::Result;
use crate::models::{Book, BookId, NewBook};

/// The storage collaborator the HTTP layer talks to.
///
/// Every mutating call is its own unit of work: it either commits
/// completely before returning or leaves the store untouched.
pub trait BookStore: Send + Sync {
    fn find_by_id(&self, id: BookId) -> Result<Option<Book>>;

    /// All records in ascending id order.
    fn list_all(&self) -> Result<Vec<Book>>;

    /// Persist a new record and return it with the id the store assigned.
    fn insert(&self, book: &NewBook) -> Result<Book>;

    /// Overwrite title, author and year of `book.id`. Returns `false` if absent.
    fn update(&self, book: &Book) -> Result<bool>;

    /// Returns `false` if no record had this id.
    fn remove_by_id(&self, id: BookId) -> Result<bool>;

    fn count(&self) -> Result<usize>;
}
