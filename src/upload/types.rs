use derivative::Derivative;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Largest file the portal will accept for submission (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Extensions offered by the file picker. This is a filter hint for the view,
/// the server performs the real validation.
pub const ACCEPTED_EXTENSIONS: [&str; 7] = ["pdf", "doc", "docx", "txt", "png", "jpg", "jpeg"];

const DEFAULT_MIME: &str = "application/octet-stream";

const MIME_TYPES: [(&str, &str); 16] = [
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("txt", "text/plain"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("rtf", "application/rtf"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("xls", "application/vnd.ms-excel"),
    ("csv", "text/csv"),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
];

/// MIME type for a file name, judged by its extension.
pub fn mime_for_name(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return DEFAULT_MIME;
    };
    let ext = ext.to_lowercase();
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME)
}

/// Where the bytes of a selected file come from.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub enum FileSource {
    /// Read from disk when the upload request is built.
    Path(PathBuf),
    Memory(#[derivative(Debug = "ignore")] Arc<[u8]>),
}

/// A user-selected file: metadata plus a reference to its content.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub source: FileSource,
}

impl FileHandle {
    /// Builds a handle from file metadata only; the content stays on disk.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_for_name(&name).to_string();

        Ok(Self {
            name,
            size: metadata.len(),
            mime_type,
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let content = content.into();
        Self {
            mime_type: mime_for_name(&name).to_string(),
            size: content.len() as u64,
            name,
            source: FileSource::Memory(content),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn exceeds_size_limit(&self) -> bool {
        self.size > MAX_FILE_SIZE
    }

    pub async fn read_content(&self) -> io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => tokio::fs::read(path).await,
            FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}
