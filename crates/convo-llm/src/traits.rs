use async_trait::async_trait;

use crate::error::Result;

/// Generates a short thread title from the text that opened the thread
#[async_trait]
pub trait TitleClient: Send + Sync {
    async fn generate_title(&self, request: TitleRequest) -> Result<String>;
}

/// Generates the assistant reply for one submission.
///
/// Pure request/response: no streaming and no partial results.
#[async_trait]
pub trait ReplyClient: Send + Sync {
    async fn generate_reply(&self, request: ReplyRequest) -> Result<String>;
}

/// Convenience trait for backends that serve both operations
pub trait ChatBackend: TitleClient + ReplyClient {}

impl<T: TitleClient + ReplyClient> ChatBackend for T {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRequest {
    pub prompt: String,
}

impl TitleRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    pub prompt: String,
    pub attachment: Option<AttachmentPayload>,
}

impl ReplyRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: AttachmentPayload) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// File content sent alongside a reply request
#[derive(Clone, PartialEq, Eq)]
pub struct AttachmentPayload {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl AttachmentPayload {
    /// Build a payload, inferring the MIME type from the file name
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = crate::mime::mime_type_for_path(&name).to_string();
        Self {
            name,
            bytes,
            mime_type,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }
}

// Keep raw bytes out of log output
impl std::fmt::Debug for AttachmentPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentPayload")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}
