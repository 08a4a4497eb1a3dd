//! SQLite storage implementation for the request audit log.

mod model;
mod repository;

pub use model::FloatRequestDB;
pub use repository::RequestRepository;
