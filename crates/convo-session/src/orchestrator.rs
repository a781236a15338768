//! Request orchestration.
//!
//! A submission records the user message synchronously, then spawns up to
//! two independent tasks: one generating the thread title (only for a newly
//! created thread) and one generating the reply. Both tasks close over the
//! thread id captured at submission time and write back through id-targeted
//! session operations, so a result arriving after the user navigated away or
//! deleted the thread lands in the right place or is dropped.

use std::sync::Arc;

use convo_llm::{
    ChatBackend, GenerationError, ReplyClient, ReplyRequest, TitleClient, TitleRequest,
};
use convo_types::{Message, SubmissionId, ThreadId};
use futures::future::OptionFuture;
use tokio::task::{JoinError, JoinHandle};

use crate::config::{OrchestratorConfig, ReplyFailurePolicy};
use crate::error::{ReplyError, SubmitRejected};
use crate::session::Session;
use crate::staging::StagedFile;

pub struct Orchestrator {
    session: Session,
    title_client: Arc<dyn TitleClient>,
    reply_client: Arc<dyn ReplyClient>,
    config: Arc<OrchestratorConfig>,
}

impl Orchestrator {
    pub fn new(
        session: Session,
        title_client: Arc<dyn TitleClient>,
        reply_client: Arc<dyn ReplyClient>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            session,
            title_client,
            reply_client,
            config: Arc::new(config),
        }
    }

    /// Use one backend for both titles and replies
    pub fn with_backend<B>(session: Session, backend: Arc<B>, config: OrchestratorConfig) -> Self
    where
        B: ChatBackend + 'static,
    {
        let title_client: Arc<dyn TitleClient> = backend.clone();
        let reply_client: Arc<dyn ReplyClient> = backend;
        Self::new(session, title_client, reply_client, config)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Submit `text` (and the staged attachment, if any) to the active thread.
    ///
    /// Starts a new thread when none is active. The user message is in the
    /// session before this returns; title and reply complete in the background.
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, text: impl Into<String>) -> Result<Submission, SubmitRejected> {
        let text = text.into();
        let submission_id = SubmissionId::new();

        let accepted = match self.session.begin_submission(&text, submission_id) {
            Ok(accepted) => accepted,
            Err(rejected) => {
                tracing::debug!(reason = %rejected, "Submission ignored");
                return Err(rejected);
            }
        };
        let thread_id = accepted.thread_id;

        tracing::info!(
            thread_id = %thread_id,
            submission_id = %submission_id,
            new_thread = accepted.created_thread,
            attachment = accepted.attachment.as_ref().map(|f| f.name()),
            "Submission accepted"
        );

        let title = accepted.created_thread.then(|| {
            let session = self.session.clone();
            let client = Arc::clone(&self.title_client);
            let config = Arc::clone(&self.config);
            let text = text.clone();
            tokio::spawn(async move {
                Self::run_title(session, client, config, thread_id, text).await
            })
        });

        let session = self.session.clone();
        let client = Arc::clone(&self.reply_client);
        let config = Arc::clone(&self.config);
        let attachment = accepted.attachment;
        let reply = tokio::spawn(async move {
            Self::run_reply(session, client, config, thread_id, submission_id, text, attachment)
                .await
        });

        Ok(Submission {
            id: submission_id,
            thread_id,
            created_thread: accepted.created_thread,
            title,
            reply,
        })
    }

    async fn run_title(
        session: Session,
        client: Arc<dyn TitleClient>,
        config: Arc<OrchestratorConfig>,
        thread_id: ThreadId,
        text: String,
    ) -> TitleOutcome {
        let prompt = if text.is_empty() {
            config.attachment_title_prompt.clone()
        } else {
            text
        };

        let (title, error) = match client.generate_title(TitleRequest::new(prompt)).await {
            Ok(title) => (title, None),
            Err(e) => {
                tracing::warn!(thread_id = %thread_id, error = %e, "Title generation failed, using fallback");
                (config.fallback_title.clone(), Some(e))
            }
        };

        let applied = session.set_title(thread_id, title.clone());
        if !applied {
            tracing::debug!(thread_id = %thread_id, "Title discarded, thread no longer exists");
        }

        TitleOutcome {
            title,
            applied,
            error,
        }
    }

    async fn run_reply(
        session: Session,
        client: Arc<dyn ReplyClient>,
        config: Arc<OrchestratorConfig>,
        thread_id: ThreadId,
        submission_id: SubmissionId,
        text: String,
        attachment: Option<StagedFile>,
    ) -> ReplyOutcome {
        let result = Self::request_reply(client.as_ref(), &config, text, attachment).await;

        let message = match &result {
            Ok(reply) => Some(Message::assistant(reply.clone())),
            Err(e) => {
                tracing::error!(thread_id = %thread_id, submission_id = %submission_id, error = %e, "Reply failed");
                match config.reply_failure {
                    ReplyFailurePolicy::LogOnly => None,
                    ReplyFailurePolicy::AppendNotice => {
                        Some(Message::assistant(config.failure_notice.clone()))
                    }
                }
            }
        };

        let appended = session.complete_reply(thread_id, submission_id, message);
        ReplyOutcome { result, appended }
    }

    async fn request_reply(
        client: &dyn ReplyClient,
        config: &OrchestratorConfig,
        text: String,
        attachment: Option<StagedFile>,
    ) -> Result<String, ReplyError> {
        let mut request = ReplyRequest::new(text);
        if let Some(file) = attachment {
            let payload = file.load().await.map_err(|source| ReplyError::Attachment {
                name: file.name().to_string(),
                source,
            })?;
            request = request.with_attachment(payload);
        }

        let call = client.generate_reply(request);
        match config.reply_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => Ok(result?),
                Err(_) => Err(ReplyError::TimedOut(limit)),
            },
            None => Ok(call.await?),
        }
    }
}

/// Handles to the background work started by one accepted submission
#[derive(Debug)]
pub struct Submission {
    pub id: SubmissionId,
    pub thread_id: ThreadId,
    pub created_thread: bool,
    /// Present only when the submission created its thread
    pub title: Option<JoinHandle<TitleOutcome>>,
    pub reply: JoinHandle<ReplyOutcome>,
}

impl Submission {
    /// Wait for both tasks
    pub async fn settle(self) -> Result<SubmissionOutcome, JoinError> {
        let title: OptionFuture<_> = self.title.into();
        let (title, reply) = tokio::join!(title, self.reply);
        Ok(SubmissionOutcome {
            thread_id: self.thread_id,
            title: title.transpose()?,
            reply: reply?,
        })
    }
}

#[derive(Debug)]
pub struct TitleOutcome {
    /// The title that was written (generated or fallback)
    pub title: String,
    /// False when the thread was deleted before the title arrived
    pub applied: bool,
    pub error: Option<GenerationError>,
}

#[derive(Debug)]
pub struct ReplyOutcome {
    pub result: Result<String, ReplyError>,
    /// Whether an assistant message (reply or failure notice) reached the thread
    pub appended: bool,
}

#[derive(Debug)]
pub struct SubmissionOutcome {
    pub thread_id: ThreadId,
    pub title: Option<TitleOutcome>,
    pub reply: ReplyOutcome,
}
