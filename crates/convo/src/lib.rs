//! # Convo
//!
//! Client-side chat session manager. Keeps a list of conversation threads,
//! tracks which one is shown, stages one attachment for the next message,
//! and reconciles asynchronous title and reply results back into the thread
//! they belong to, even when the user has switched threads or deleted one in
//! the meantime.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use convo::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = ClientFactory::create_backend(&BackendConfig::default())?;
//!     let orchestrator =
//!         Orchestrator::with_backend(Session::new(), backend, OrchestratorConfig::default());
//!
//!     let submission = orchestrator.submit("Hello!")?;
//!     let outcome = submission.settle().await?;
//!
//!     let state = orchestrator.session().snapshot();
//!     if let Some(thread) = state.thread(outcome.thread_id) {
//!         println!("{}: {} messages", thread.title, thread.messages.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`convo-types`**: threads, messages, ids and session events
//! - **`convo-llm`**: title/reply client traits and the HTTP backend client
//! - **`convo-session`**: thread store, selection, staging, request tracking
//!   and the orchestrator
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use convo_types::{
    Message, MessageRole, SessionEvent, SubmissionId, Thread, ThreadId, PLACEHOLDER_TITLE,
};

pub use convo_llm::{
    AttachmentPayload, BackendConfig, ChatBackend, ClientFactory, GenerationError,
    HttpBackendClient, ReplyClient, ReplyRequest, TitleClient, TitleRequest,
};

pub use convo_session::{
    ActiveSelection, AttachmentSource, AttachmentStaging, Orchestrator, OrchestratorConfig,
    ReplyError, ReplyFailurePolicy, ReplyOutcome, RequestState, RequestTracker, Session,
    SessionState, StagedFile, Submission, SubmissionOutcome, SubmitRejected, ThreadStore,
    TitleOutcome,
};
