use std::io;
use thiserror::Error;

pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while uploading the file.";
pub const CONNECTION_FAILURE_MESSAGE: &str =
    "Unable to connect to the server. Please check if the server is running.";

/// Problems caught locally, before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File size must be less than 10MB")]
    FileTooLarge { size: u64 },
    #[error("Please select a file before uploading.")]
    NoFileSelected,
    #[error("An upload is already in progress.")]
    UploadInProgress,
    #[error("Could not read {name}: {reason}")]
    Unreadable { name: String, reason: String },
}

/// Terminal failures of a single submission.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No response was received at all.
    #[error("{}", CONNECTION_FAILURE_MESSAGE)]
    Transport(#[source] reqwest::Error),
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("response with status {status} was not valid JSON")]
    MalformedResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to read {name}: {source}")]
    ReadFile {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to build upload request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Invalid server address: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("upload ended before a response was handled")]
    Interrupted,
}

impl UploadError {
    /// The text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => CONNECTION_FAILURE_MESSAGE.to_string(),
            Self::MalformedResponse { .. } | Self::Interrupted => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            other => {
                let message = other.to_string();
                if message.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    message
                }
            }
        }
    }
}
