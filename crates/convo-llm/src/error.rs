use thiserror::Error;

/// Failure of a remote generation call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Transport failure: connection refused, DNS, TLS, client-side timeout
    #[error("Network error: {0}")]
    Network(String),

    /// The remote operation answered with an error payload or status
    #[error("Service error: {0}")]
    Service(String),

    /// The remote answered, but not with anything we can use
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    pub fn is_network(&self) -> bool {
        matches!(self, GenerationError::Network(_))
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GenerationError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            GenerationError::Service(format!("HTTP {}", status))
        } else {
            GenerationError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
