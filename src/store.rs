// store.rs — upload storage: extension gate, timestamp-unique names,
// stitched-file passthrough

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
const STITCHED_NAME: &str = "stitched_latest.jpg";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No selected file")]
    EmptyFileName,
    #[error("Invalid file type")]
    InvalidFileType,
    #[error("invalid stored-file name: {0}")]
    InvalidStoredName(String),
    #[error("File does not exist: {0}")]
    MissingSource(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A file accepted into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub file_name: String,
    pub path: PathBuf,
}

/// Flat directory of uploaded panoramas. Accepted files are stored under a
/// millisecond-timestamp prefix, so a prior upload is never overwritten even
/// when two clients send the same file name.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

/// Extension gate, case-insensitive. This is the only validation uploads get;
/// decoding problems surface later, in the viewer's texture loader.
pub fn allowed_file(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

/// Keep only characters that are safe in a flat file name; everything else
/// (path separators included) becomes '_'.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl UploadStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Accept an upload: validate the extension, pick a unique name, write
    /// the bytes. Rejections never touch the disk.
    pub fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredImage, StoreError> {
        if original_name.trim().is_empty() {
            return Err(StoreError::EmptyFileName);
        }
        if !allowed_file(original_name) {
            return Err(StoreError::InvalidFileType);
        }

        let file_name = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        let path = self.root.join(&file_name);
        fs::write(&path, bytes)?;

        Ok(StoredImage { file_name, path })
    }

    /// Bytes of a stored file. Rejects anything that is not a plain file name
    /// so a request can never read outside the store.
    pub fn read(&self, file_name: &str) -> Result<Vec<u8>, StoreError> {
        if file_name.is_empty()
            || file_name.contains('/')
            || file_name.contains('\\')
            || file_name == "."
            || file_name == ".."
        {
            return Err(StoreError::InvalidStoredName(file_name.to_string()));
        }
        Ok(fs::read(self.root.join(file_name))?)
    }

    /// Degenerate stitched-image passthrough: copy an existing file into the
    /// store under a fixed name. Unlike uploads this deliberately overwrites,
    /// keeping exactly one "latest" stitched result.
    pub fn import_stitched(&self, source: &Path) -> Result<StoredImage, StoreError> {
        if !source.exists() {
            return Err(StoreError::MissingSource(source.to_path_buf()));
        }
        let path = self.root.join(STITCHED_NAME);
        fs::copy(source, &path)?;
        Ok(StoredImage {
            file_name: STITCHED_NAME.to_string(),
            path,
        })
    }
}
