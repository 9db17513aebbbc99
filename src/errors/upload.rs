use thiserror::Error;

/// Failures of the external upload relay. The service layer treats every
/// variant as the same "upload failed" category; the split exists for logs.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid service credential: {0}")]
    Credential(String),

    #[error("Token exchange failed: {0}")]
    Token(String),

    #[error("Storage API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Storage API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("I/O error reading upload content: {0}")]
    Io(#[from] std::io::Error),
}
