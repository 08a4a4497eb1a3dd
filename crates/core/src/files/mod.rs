//! Files module - blob storage for expense attachments.

mod files_model;
mod files_traits;
mod local_store;

pub use files_model::{sanitize_file_name, FileUpload, StoredFileRef};
pub use files_traits::FileStoreTrait;
pub use local_store::LocalFileStore;
