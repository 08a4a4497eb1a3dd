//! File attachment domain models.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// An uploaded file as received from the transport layer.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub original_name: String,
}

/// Opaque reference to a stored file. `key` is meaningful only to the store
/// that produced it; `url` is set when the backing store is public.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFileRef {
    pub key: String,
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Rewrites a client-supplied file name into something safe to use as an
/// object key segment: the base is stripped to `[a-zA-Z0-9_.-]`, truncated,
/// and the extension is kept.
pub fn sanitize_file_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("file");

    let safe_stem: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect();

    if extension.is_empty() {
        safe_stem
    } else {
        format!("{safe_stem}.{extension}")
    }
}
