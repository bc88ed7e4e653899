use crate::config::PortalConfig;
use crate::upload::error::UploadError;
use crate::upload::types::FileHandle;
use crate::utils::file_size::format_size;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

/// Multipart field the server reads the document from.
pub const FILE_FIELD: &str = "file";

/// Talks to the document-processing endpoint.
#[derive(Debug, Clone)]
pub struct DocumentClient {
    http: Client,
    endpoint: Url,
}

impl DocumentClient {
    pub fn new(config: &PortalConfig) -> Result<Self, UploadError> {
        let endpoint = config.upload_endpoint()?;
        // Cookies set by the server are sent back on later uploads.
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(UploadError::Request)?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one file and returns the parsed JSON body of a successful response.
    pub async fn upload(&self, file: &FileHandle) -> Result<Value, UploadError> {
        info!(
            name = %file.name,
            size = %format_size(file.size),
            mime_type = %file.mime_type,
            "starting document upload"
        );

        let content = file
            .read_content()
            .await
            .map_err(|source| UploadError::ReadFile {
                name: file.name.clone(),
                source,
            })?;

        let part = Part::bytes(content)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(UploadError::Request)?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    UploadError::Request(e)
                } else {
                    warn!(error = %e, endpoint = %self.endpoint, "upload request failed");
                    UploadError::Transport(e)
                }
            })?;

        let status = response.status();
        debug!(status = status.as_u16(), "received upload response");

        let body = response.bytes().await.map_err(UploadError::Transport)?;
        let data: Value =
            serde_json::from_slice(&body).map_err(|source| UploadError::MalformedResponse {
                status: status.as_u16(),
                source,
            })?;

        if !status.is_success() {
            return Err(UploadError::Service {
                status: status.as_u16(),
                message: service_message(&data, status),
            });
        }

        info!(status = status.as_u16(), "document processed");
        Ok(data)
    }
}

/// Message for an error response: the server's `detail` when it carries one,
/// otherwise a message naming the status code.
fn service_message(body: &Value, status: StatusCode) -> String {
    // Only an object body can carry `detail`; arrays and scalars never do.
    let detail = body.as_object().and_then(|fields| fields.get("detail")).cloned();

    match detail {
        Some(Value::String(text)) if !text.is_empty() => text,
        Some(Value::Null) | Some(Value::Bool(false)) | Some(Value::String(_)) | None => {
            format!("Upload failed with status {}", status.as_u16())
        }
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {
            format!("Upload failed with status {}", status.as_u16())
        }
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
