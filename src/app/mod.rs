mod controller;
mod state;
mod ui;

use crate::config::PortalConfig;
use crate::upload::{DocumentClient, FileHandle, UploadError, ValidationError, ACCEPTED_EXTENSIONS};
use eframe::{egui, App};
use rfd::FileDialog;
use serde_json::Value;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info};

pub use controller::UploadController;
pub use state::{UploadSession, UploadStatus};

type UploadOutcome = Result<Value, UploadError>;

/// Desktop window around an [`UploadSession`].
///
/// Uploads run on the app's tokio runtime; their outcome comes back over a
/// channel that is polled every frame.
pub struct DocumentPortal {
    config: PortalConfig,
    client: DocumentClient,
    runtime: Runtime,
    session: UploadSession,
    outcome_receiver: Option<std_mpsc::Receiver<UploadOutcome>>,
}

impl DocumentPortal {
    pub fn new(config: PortalConfig) -> anyhow::Result<Self> {
        let client = DocumentClient::new(&config)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        info!(endpoint = %client.endpoint(), "document portal ready");

        Ok(Self {
            config,
            client,
            runtime,
            session: UploadSession::default(),
            outcome_receiver: None,
        })
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    pub fn pick_file(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("Documents and images", &ACCEPTED_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        match FileHandle::from_path(&path) {
            Ok(file) => {
                if let Err(e) = self.session.select_file(Some(file)) {
                    debug!(error = %e, "selection not accepted");
                }
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "could not inspect selected file");
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.session.reject_selection(ValidationError::Unreadable {
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    pub fn start_upload(&mut self) {
        let Ok(file) = self.session.begin_submit() else {
            return;
        };

        let (sender, receiver) = std_mpsc::channel();
        self.outcome_receiver = Some(receiver);

        let client = self.client.clone();
        self.runtime.spawn(async move {
            let outcome = client.upload(&file).await;
            let _ = sender.send(outcome);
        });
    }

    pub fn reset_upload_state(&mut self) {
        info!("clearing upload session");
        self.session.reset();
        self.outcome_receiver = None;
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.outcome_receiver else {
            return;
        };

        match receiver.try_recv() {
            Ok(outcome) => {
                self.session.finish_submit(outcome);
                self.outcome_receiver = None;
                ctx.request_repaint();
            }
            Err(std_mpsc::TryRecvError::Empty) => {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
            // The upload task went away without reporting (it panicked).
            Err(std_mpsc::TryRecvError::Disconnected) => {
                self.session.finish_submit(Err(UploadError::Interrupted));
                self.outcome_receiver = None;
                ctx.request_repaint();
            }
        }
    }
}

impl App for DocumentPortal {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
