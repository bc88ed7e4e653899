pub mod app;
pub mod config;
pub mod upload;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use app::{DocumentPortal, UploadController, UploadSession, UploadStatus};
pub use config::PortalConfig;
pub use upload::{DocumentClient, FileHandle, UploadError, ValidationError};
