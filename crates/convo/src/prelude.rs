//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use convo::prelude::*;
//! ```

pub use crate::{
    BackendConfig, ClientFactory, Message, MessageRole, Orchestrator, OrchestratorConfig,
    ReplyClient, SessionEvent, Session, SessionState, StagedFile, Submission, SubmitRejected,
    Thread, ThreadId, TitleClient,
};
