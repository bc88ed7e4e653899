use axum::extract::Multipart;
use axum::http::header::{HeaderName, ACCEPT, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;
use url::Url;

use crate::config::{PortalConfig, UPLOAD_PATH};

/// How the fake processing server answers uploads.
#[derive(Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Text(StatusCode, &'static str),
    /// Describes the received multipart request back to the caller.
    Echo,
    /// Never answers within a test's lifetime.
    Stall,
}

async fn handle_upload(
    reply: Reply,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> axum::response::Response {
    match reply {
        Reply::Json(status, body) => (status, Json(body)).into_response(),
        Reply::Text(status, body) => (status, body).into_response(),
        Reply::Stall => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
        Reply::Echo => {
            let mut fields = Vec::new();
            while let Ok(Some(field)) = multipart.next_field().await {
                let name = field.name().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.unwrap_or_default();
                fields.push(json!({
                    "name": name,
                    "file_name": file_name,
                    "content_type": content_type,
                    "content": String::from_utf8_lossy(&data),
                }));
            }
            let header = |name: HeaderName| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            let body = json!({
                "accept": header(ACCEPT),
                "cookie": header(COOKIE),
                "fields": fields,
            });
            (
                StatusCode::OK,
                [(SET_COOKIE, "portal_session=abc123; Path=/")],
                Json(body),
            )
                .into_response()
        }
    }
}

/// Starts a processing server on an ephemeral port and returns its config.
pub async fn spawn_server(reply: Reply) -> PortalConfig {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let route = format!("/{}", UPLOAD_PATH);
    let app = Router::new().route(
        &route,
        post(move |headers: HeaderMap, multipart: Multipart| {
            handle_upload(reply.clone(), headers, multipart)
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    PortalConfig::new(Url::parse(&format!("http://{}", addr)).expect("server url"))
}

/// Config pointing at a port nothing listens on.
pub async fn unreachable_server() -> PortalConfig {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    PortalConfig::new(Url::parse(&format!("http://{}", addr)).expect("server url"))
}
