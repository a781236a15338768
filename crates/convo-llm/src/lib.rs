pub mod config;
pub mod error;
pub mod http;
pub mod mime;
pub mod title;
pub mod traits;

pub use config::{BackendConfig, ClientFactory, DEFAULT_BASE_URL};
pub use error::{GenerationError, Result};
pub use http::{HttpBackendClient, HttpBackendClientBuilder};
pub use mime::mime_type_for_path;
pub use title::sanitize_title;
pub use traits::{AttachmentPayload, ChatBackend, ReplyClient, ReplyRequest, TitleClient, TitleRequest};
