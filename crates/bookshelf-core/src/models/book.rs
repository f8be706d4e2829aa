use serde::{Deserialize, Serialize};

/// Store-assigned book identifier.
pub type BookId = i64;

/// A persisted book record.
///
/// Serialized with camelCase keys: `{"id":1,"title":"...","author":"...","yearPublished":1960}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year_published: i32,
}

impl Book {
    /// Overwrite the mutable fields from `input`. The id is never touched.
    pub fn apply(&mut self, input: NewBook) {
        self.title = input.title;
        self.author = input.author;
        self.year_published = input.year_published;
    }
}

/// Payload accepted by create and update.
///
/// A client-supplied `id` is ignored; missing fields fall back to empty defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year_published: i32,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year_published: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year_published,
        }
    }

    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            year_published: self.year_published,
        }
    }
}

/// Records a fresh store is seeded with.
pub fn seed_books() -> Vec<Book> {
    vec![
        NewBook::new("To Kill a Mockingbird", "Harper Lee", 1960).into_book(1),
        NewBook::new("1984", "George Orwell", 1949).into_book(2),
        NewBook::new("The Great Gatsby", "F. Scott Fitzgerald", 1925).into_book(3),
    ]
}
