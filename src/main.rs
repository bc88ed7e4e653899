use anyhow::{anyhow, bail};
use clap::Parser;
use document_portal::{
    DocumentClient, DocumentPortal, FileHandle, PortalConfig, UploadController, UploadStatus,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Parser)]
#[command(
    name = "document-portal",
    about = "Upload documents for analysis and view the results"
)]
struct Cli {
    /// Base URL of the document-processing server.
    #[arg(long, default_value = document_portal::config::DEFAULT_SERVER)]
    server: Url,

    /// Upload this file without opening a window and print the result.
    #[arg(long)]
    file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = PortalConfig::new(cli.server);

    match cli.file {
        Some(path) => upload_once(config, path),
        None => open_window(config),
    }
}

fn upload_once(config: PortalConfig, path: PathBuf) -> anyhow::Result<()> {
    let file = FileHandle::from_path(&path)
        .map_err(|e| anyhow!("could not read {}: {}", path.display(), e))?;
    let mut controller = UploadController::new(DocumentClient::new(&config)?);

    controller.select_file(Some(file))?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(controller.submit());

    let session = controller.session();
    match (session.status(), session.pretty_result()) {
        (UploadStatus::Succeeded, Some(result)) => {
            info!(path = %path.display(), "upload complete");
            println!("{}", result);
            Ok(())
        }
        _ => bail!(session
            .error()
            .unwrap_or(document_portal::upload::GENERIC_FAILURE_MESSAGE)
            .to_string()),
    }
}

fn open_window(config: PortalConfig) -> anyhow::Result<()> {
    let portal = DocumentPortal::new(config)?;
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([800.0, 700.0])
            .with_min_inner_size([480.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Intelligent Document Insights Portal",
        options,
        Box::new(move |_cc: &eframe::CreationContext<'_>| -> Box<dyn eframe::App> {
            Box::new(portal)
        }),
    )
    .map_err(|e| anyhow!("window closed with an error: {}", e))
}
