use std::time::Duration;

use convo_llm::GenerationError;
use convo_types::ThreadId;
use thiserror::Error;

/// Why a submission was ignored
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("Nothing to send: text is empty and no attachment is staged")]
    Empty,

    #[error("Thread {0} is still waiting for a reply")]
    ThreadBusy(ThreadId),
}

/// Failure of the reply half of a submission
#[derive(Error, Debug)]
pub enum ReplyError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Failed to read attachment {name}: {source}")]
    Attachment {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Reply timed out after {0:?}")]
    TimedOut(Duration),
}
