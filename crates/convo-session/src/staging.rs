use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use convo_llm::AttachmentPayload;

/// Where a staged file's content comes from
#[derive(Clone, PartialEq, Eq)]
pub enum AttachmentSource {
    /// Read from disk when the submission is sent
    Path(PathBuf),
    /// Content already in memory (drag and drop, clipboard, tests)
    Bytes(Arc<[u8]>),
}

impl std::fmt::Debug for AttachmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachmentSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            AttachmentSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

/// A file reference waiting to be sent with the next submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    name: String,
    source: AttachmentSource,
}

impl StagedFile {
    /// Stage a file on disk; the display name is its final path component
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            source: AttachmentSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            source: AttachmentSource::Bytes(bytes.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &AttachmentSource {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            AttachmentSource::Path(path) => Some(path),
            AttachmentSource::Bytes(_) => None,
        }
    }

    /// Read the content and package it for the reply request
    pub async fn load(&self) -> io::Result<AttachmentPayload> {
        let bytes = match &self.source {
            AttachmentSource::Path(path) => tokio::fs::read(path).await?,
            AttachmentSource::Bytes(bytes) => bytes.to_vec(),
        };
        Ok(AttachmentPayload::new(self.name.clone(), bytes))
    }
}

/// Holds at most one pending attachment between selection and submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentStaging {
    staged: Option<StagedFile>,
}

impl AttachmentStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a file, returning whatever it replaced
    pub fn stage(&mut self, file: StagedFile) -> Option<StagedFile> {
        self.staged.replace(file)
    }

    pub fn clear(&mut self) -> bool {
        self.staged.take().is_some()
    }

    /// Remove and return the staged file (used when a submission consumes it)
    pub fn take(&mut self) -> Option<StagedFile> {
        self.staged.take()
    }

    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn is_staged(&self) -> bool {
        self.staged.is_some()
    }
}
