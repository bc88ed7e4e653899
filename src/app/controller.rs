use super::state::UploadSession;
use crate::upload::{DocumentClient, FileHandle, UploadError, ValidationError};
use serde_json::Value;

/// Drives one [`UploadSession`] against a [`DocumentClient`].
///
/// `submit` borrows the controller mutably for the whole request, so a second
/// submission cannot start until the first has settled.
#[derive(Debug)]
pub struct UploadController {
    session: UploadSession,
    client: DocumentClient,
}

impl UploadController {
    pub fn new(client: DocumentClient) -> Self {
        Self {
            session: UploadSession::default(),
            client,
        }
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    pub fn select_file(&mut self, candidate: Option<FileHandle>) -> Result<(), ValidationError> {
        self.session.select_file(candidate)
    }

    pub async fn submit(&mut self) {
        let Ok(file) = self.session.begin_submit() else {
            return;
        };

        let in_flight = InFlight::new(&mut self.session);
        let outcome = self.client.upload(&file).await;
        in_flight.settle(outcome);
    }
}

/// Holds a session that is `Uploading`. Dropping it without `settle` (the
/// future was cancelled, or something panicked) still marks the submission as
/// failed so the session never stays stuck in `Uploading`.
struct InFlight<'a> {
    session: &'a mut UploadSession,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn new(session: &'a mut UploadSession) -> Self {
        Self {
            session,
            settled: false,
        }
    }

    fn settle(mut self, outcome: Result<Value, UploadError>) {
        self.session.finish_submit(outcome);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.session.finish_submit(Err(UploadError::Interrupted));
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
