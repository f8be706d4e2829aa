mod book_repository;

pub use book_repository::{BookRepository, SqliteBookRepository};

use crate::error::Result;

pub trait Repository {
    type Entity;
    type Id;

    fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::Entity>>;
    /// Overwrite an existing entity. Returns `false` when no row matched.
    fn update(&self, entity: &Self::Entity) -> Result<bool>;
    fn delete(&self, id: &Self::Id) -> Result<bool>;
}
