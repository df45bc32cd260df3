//! Chart image selected for analysis

use crate::error::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// An image chosen in the upload panel
///
/// Files picked from disk are only read when the analysis is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFile {
    name: String,
    source: Source,
}

impl ChartFile {
    /// Reference an image on disk
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name,
            source: Source::Path(path),
        }
    }

    /// Wrap bytes already in memory
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: Source::Bytes(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type guessed from the file extension
    pub fn mime_type(&self) -> &'static str {
        let ext = Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        }
    }

    /// Read the whole image and encode it as `data:<mime>;base64,<payload>`
    pub async fn read_data_url(&self) -> Result<String> {
        let encoded = match &self.source {
            Source::Path(path) => STANDARD.encode(tokio::fs::read(path).await?),
            Source::Bytes(bytes) => STANDARD.encode(bytes),
        };

        Ok(format!("data:{};base64,{encoded}", self.mime_type()))
    }
}

/// Drop the `data:...;base64,` header of a data URL
///
/// Input without a comma is returned unchanged.
pub fn strip_data_url_prefix(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map_or(data_url, |(_, payload)| payload)
}
