use crate::upload::{FileHandle, UploadError, ValidationError};
use crate::utils::file_size::format_size;
use serde_json::Value;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

/// Everything the view needs to know about the current upload.
///
/// Fields are only changed through the transition methods, which keep these
/// rules intact:
/// - `Uploading` always has a selected file,
/// - `Succeeded` always has a result,
/// - `progress` is 0 whenever the session is not uploading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSession {
    selected_file: Option<FileHandle>,
    status: UploadStatus,
    progress: u8,
    error: Option<String>,
    result: Option<Value>,
}

impl UploadSession {
    pub fn selected_file(&self) -> Option<&FileHandle> {
        self.selected_file.as_ref()
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.is_uploading()
    }

    /// Applies a pick from the file chooser. `None` (a cancelled pick) keeps the
    /// current selection.
    pub fn select_file(&mut self, candidate: Option<FileHandle>) -> Result<(), ValidationError> {
        let Some(file) = candidate else {
            return Ok(());
        };
        if self.is_uploading() {
            debug!(name = %file.name, "ignoring selection while uploading");
            return Err(ValidationError::UploadInProgress);
        }

        if file.exceeds_size_limit() {
            let err = ValidationError::FileTooLarge { size: file.size };
            warn!(name = %file.name, size = %format_size(file.size), "file rejected");
            self.reject_selection(err.clone());
            return Err(err);
        }

        debug!(name = %file.name, size = %format_size(file.size), "file selected");
        self.selected_file = Some(file);
        self.error = None;
        Ok(())
    }

    /// Drops the current selection and shows `err`.
    pub fn reject_selection(&mut self, err: ValidationError) {
        if self.is_uploading() {
            return;
        }
        self.selected_file = None;
        self.error = Some(err.to_string());
    }

    /// Moves into `Uploading` and hands out the file to send.
    pub fn begin_submit(&mut self) -> Result<FileHandle, ValidationError> {
        if self.is_uploading() {
            warn!("submit ignored, an upload is already in flight");
            return Err(ValidationError::UploadInProgress);
        }
        let Some(file) = self.selected_file.clone() else {
            let err = ValidationError::NoFileSelected;
            self.error = Some(err.to_string());
            return Err(err);
        };

        self.status = UploadStatus::Uploading;
        self.error = None;
        self.progress = 0;
        Ok(file)
    }

    /// Records how a submission ended. Always leaves `Uploading` and zeroes
    /// progress.
    pub fn finish_submit(&mut self, outcome: Result<Value, UploadError>) {
        match outcome {
            Ok(data) => {
                info!("upload succeeded");
                self.result = Some(data);
                self.status = UploadStatus::Succeeded;
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, "upload failed");
                self.status = UploadStatus::Failed;
                self.error = Some(err.user_message());
            }
        }
        self.progress = 0;
    }

    pub fn reset(&mut self) {
        *self = UploadSession::default();
    }

    pub fn progress_fraction(&self) -> f32 {
        f32::from(self.progress) / 100.0
    }

    pub fn status_text(&self) -> String {
        match self.status {
            UploadStatus::Idle => String::new(),
            UploadStatus::Uploading => format!("Uploading: {}%", self.progress),
            UploadStatus::Succeeded => "Analysis complete".to_string(),
            UploadStatus::Failed => "Upload failed".to_string(),
        }
    }

    /// One-line description of the selected file, e.g. `report.pdf (1.50 MB)`.
    pub fn selection_summary(&self) -> Option<String> {
        self.selected_file
            .as_ref()
            .map(|file| format!("{} ({})", file.name, format_size(file.size)))
    }

    /// The last result as indented JSON.
    pub fn pretty_result(&self) -> Option<String> {
        self.result
            .as_ref()
            .map(|data| serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
