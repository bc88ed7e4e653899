use url::Url;

pub const DEFAULT_SERVER: &str = "http://localhost:8000";
pub const UPLOAD_PATH: &str = "api/upload/document";

/// Where the document-processing server lives.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub server: Url,
}

impl PortalConfig {
    pub fn new(server: Url) -> Self {
        Self { server }
    }

    /// Resolves the upload route relative to `server`, keeping any path prefix
    /// the server is mounted under.
    pub fn upload_endpoint(&self) -> Result<Url, url::ParseError> {
        let mut base = self.server.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(UPLOAD_PATH)
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            server: Url::parse(DEFAULT_SERVER).expect("default server url is valid"),
        }
    }
}
