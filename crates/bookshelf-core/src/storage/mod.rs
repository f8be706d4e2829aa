pub mod database;
pub mod repositories;
mod store;

pub use store::BookStore;
