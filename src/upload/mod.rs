mod client;
mod error;
mod types;

pub use client::{DocumentClient, FILE_FIELD};
pub use error::{
    UploadError, ValidationError, CONNECTION_FAILURE_MESSAGE, GENERIC_FAILURE_MESSAGE,
};
pub use types::{mime_for_name, FileHandle, FileSource, ACCEPTED_EXTENSIONS, MAX_FILE_SIZE};
