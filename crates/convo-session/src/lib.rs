pub mod config;
pub mod error;
pub mod orchestrator;
pub mod request_state;
pub mod selection;
pub mod session;
pub mod staging;
pub mod state;
pub mod store;

pub use config::{OrchestratorConfig, ReplyFailurePolicy};
pub use error::{ReplyError, SubmitRejected};
pub use orchestrator::{Orchestrator, ReplyOutcome, Submission, SubmissionOutcome, TitleOutcome};
pub use request_state::{RequestState, RequestTracker};
pub use selection::ActiveSelection;
pub use session::Session;
pub use staging::{AttachmentSource, AttachmentStaging, StagedFile};
pub use state::SessionState;
pub use store::ThreadStore;
