use std::io;
use std::path::{Path, PathBuf};

/// A user-selected tabular file awaiting upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    file_name: String,
    source: FileSource,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum FileSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

impl UploadedFile {
    /// Refer to a file on disk; it is read when the upload starts.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        Self {
            file_name,
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            source: FileSource::Memory(bytes),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(path) => Some(path),
            FileSource::Memory(_) => None,
        }
    }

    pub fn is_csv(&self) -> bool {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }

    pub fn content_type(&self) -> &'static str {
        if self.is_csv() {
            "text/csv"
        } else {
            "application/octet-stream"
        }
    }

    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => std::fs::read(path),
            FileSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}
