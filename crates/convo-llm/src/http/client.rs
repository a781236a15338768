// HTTP client for the chat backend (`/chat` and `/generate_title`)

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::DEFAULT_BASE_URL;
use crate::error::GenerationError;
use crate::title::sanitize_title;
use crate::traits::{ReplyClient, ReplyRequest, TitleClient, TitleRequest};

/// Backend client (HTTP direct)
///
/// - Replies: `POST {base}/chat` as multipart form (`message`, optional `file`)
/// - Titles: `POST {base}/generate_title` with `{"message": ...}`
///
/// The backend reports service failures as `{"error": ...}` with a 200 status,
/// so the body is inspected even when the status is a success.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpBackendClient {
    /// Client for the given base URL with default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> HttpBackendClientBuilder {
        HttpBackendClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn build_form(request: ReplyRequest) -> std::result::Result<Form, GenerationError> {
        let form = Form::new().text("message", request.prompt);

        match request.attachment {
            Some(attachment) => {
                let part = Part::bytes(attachment.bytes)
                    .file_name(attachment.name)
                    .mime_str(&attachment.mime_type)
                    .map_err(|e| {
                        GenerationError::InvalidResponse(format!("invalid attachment MIME type: {}", e))
                    })?;
                Ok(form.part("file", part))
            }
            None => Ok(form),
        }
    }

    async fn read_body<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> std::result::Result<T, GenerationError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Service(format!("HTTP {}: {}", status, text)));
        }

        serde_json::from_str(&text)
            .map_err(|e| GenerationError::InvalidResponse(format!("{}: {}", e, text)))
    }
}

/// Builder for HttpBackendClient
#[derive(Debug, Default)]
pub struct HttpBackendClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl HttpBackendClientBuilder {
    /// Backend root, e.g. "http://localhost:8000"
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-request transport timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<HttpBackendClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        url::Url::parse(&base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("Failed to create HTTP client")?;

        Ok(HttpBackendClient {
            http_client,
            base_url,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    #[serde(default)]
    reply: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TitleResponseBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

#[async_trait]
impl ReplyClient for HttpBackendClient {
    async fn generate_reply(&self, request: ReplyRequest) -> crate::error::Result<String> {
        let url = self.build_url("chat");
        tracing::debug!(
            url = %url,
            attachment = ?request.attachment.as_ref().map(|a| &a.name),
            "Sending reply request"
        );

        let form = Self::build_form(request)?;
        let response = self.http_client.post(&url).multipart(form).send().await?;
        let body: ChatResponseBody = Self::read_body(response).await?;

        // An empty reply counts as missing
        match (body.reply.filter(|reply| !reply.is_empty()), body.error) {
            (Some(reply), _) => Ok(reply),
            (None, Some(error)) => Err(GenerationError::Service(error)),
            (None, None) => Err(GenerationError::InvalidResponse(
                "response has neither reply nor error".to_string(),
            )),
        }
    }
}

#[async_trait]
impl TitleClient for HttpBackendClient {
    async fn generate_title(&self, request: TitleRequest) -> crate::error::Result<String> {
        let url = self.build_url("generate_title");
        tracing::debug!(url = %url, "Sending title request");

        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({ "message": request.prompt }))
            .send()
            .await?;
        let body: TitleResponseBody = Self::read_body(response).await?;

        match (body.title, body.error) {
            (Some(title), _) => sanitize_title(&title),
            (None, Some(error)) => Err(GenerationError::Service(error)),
            (None, None) => Err(GenerationError::InvalidResponse(
                "response has no title".to_string(),
            )),
        }
    }
}
