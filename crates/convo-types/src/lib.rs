pub mod events;
pub mod message;
pub mod thread;

pub use events::SessionEvent;
pub use message::{Message, MessageRole};
pub use thread::{SubmissionId, Thread, ThreadId, PLACEHOLDER_TITLE};
