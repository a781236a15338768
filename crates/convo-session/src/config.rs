use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What to do with the transcript when a reply cannot be generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyFailurePolicy {
    /// Log the error and append nothing
    #[default]
    LogOnly,
    /// Log the error and append `failure_notice` as an assistant message
    AppendNotice,
}

/// Behavior knobs for the orchestrator.
///
/// Not deserialized directly; file and env configuration map onto it
/// (see the CLI's `[session]` section, which takes the timeout in seconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Title used when title generation fails
    pub fallback_title: String,
    /// Prompt sent for title generation when the submission has no text
    pub attachment_title_prompt: String,
    /// Upper bound on a reply; `None` waits indefinitely
    pub reply_timeout: Option<Duration>,
    pub reply_failure: ReplyFailurePolicy,
    pub failure_notice: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            fallback_title: "New chat".to_string(),
            attachment_title_prompt: "File attachment".to_string(),
            reply_timeout: None,
            reply_failure: ReplyFailurePolicy::LogOnly,
            failure_notice: "The reply could not be generated. Please try again.".to_string(),
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    pub fn with_attachment_title_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.attachment_title_prompt = prompt.into();
        self
    }

    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = Some(timeout);
        self
    }

    pub fn with_reply_failure(mut self, policy: ReplyFailurePolicy) -> Self {
        self.reply_failure = policy;
        self
    }

    pub fn with_failure_notice(mut self, notice: impl Into<String>) -> Self {
        self.failure_notice = notice.into();
        self
    }
}
