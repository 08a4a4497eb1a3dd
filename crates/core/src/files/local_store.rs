use std::fs;
use std::path::PathBuf;

use log::debug;

use super::files_model::{sanitize_file_name, FileUpload, StoredFileRef};
use super::files_traits::FileStoreTrait;
use crate::errors::{Error, Result};

/// Filesystem-backed blob store, writing each object under its key relative
/// to a root directory.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileStoreTrait for LocalFileStore {
    fn store(&self, upload: &FileUpload, hint: &str) -> Result<StoredFileRef> {
        let key = format!(
            "{}/{}",
            hint.trim_matches('/'),
            sanitize_file_name(&upload.original_name)
        );
        let path = self.root.join(&key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &upload.bytes)?;
        debug!("stored {} byte upload at {}", upload.bytes.len(), key);

        Ok(StoredFileRef {
            key,
            original_name: upload.original_name.clone(),
            url: None,
        })
    }

    fn locate(&self, key: &str) -> Result<String> {
        let path = self.root.join(key);
        if !path.is_file() {
            return Err(Error::NotFound(format!("no stored file under key {key}")));
        }
        Ok(path.display().to_string())
    }
}
