use super::files_model::{FileUpload, StoredFileRef};
use crate::errors::Result;

/// Blob store for expense attachments. May be filesystem- or
/// object-storage-backed; callers treat the returned key as opaque.
pub trait FileStoreTrait: Send + Sync {
    /// Persists the upload under a key derived from `hint` (a
    /// `/`-separated prefix such as `odas/3/invoices/2`) and the sanitized
    /// original file name.
    fn store(&self, upload: &FileUpload, hint: &str) -> Result<StoredFileRef>;

    /// Resolves a stored key to a locator the transport layer can serve
    /// from: a filesystem path or a URL.
    fn locate(&self, key: &str) -> Result<String>;
}
