use super::*;
use crate::app::UploadStatus;
use crate::config::PortalConfig;
use crate::test_support::{spawn_server, unreachable_server, Reply};
use crate::upload::{CONNECTION_FAILURE_MESSAGE, GENERIC_FAILURE_MESSAGE, MAX_FILE_SIZE};
use axum::http::StatusCode;
use serde_json::json;
use std::time::Duration;

fn controller_for(config: &PortalConfig) -> UploadController {
    UploadController::new(DocumentClient::new(config).expect("client"))
}

fn two_kb_text_file() -> FileHandle {
    FileHandle::from_bytes("summary.txt", vec![b'a'; 2048])
}

#[tokio::test]
async fn submit_without_selection_makes_no_request() {
    // Any request would hit a closed port and produce the connection message.
    let mut controller = controller_for(&unreachable_server().await);

    controller.submit().await;

    let session = controller.session();
    assert_eq!(session.error(), Some("Please select a file before uploading."));
    assert_eq!(session.status(), UploadStatus::Idle);
}

#[tokio::test]
async fn successful_upload_stores_result() {
    let body = json!({"pages": 3, "summary": "ok"});
    let config = spawn_server(Reply::Json(StatusCode::OK, body.clone())).await;
    let mut controller = controller_for(&config);

    controller.select_file(Some(two_kb_text_file())).unwrap();
    controller.submit().await;

    let session = controller.session();
    assert_eq!(session.status(), UploadStatus::Succeeded);
    assert_eq!(session.result(), Some(&body));
    assert!(session.error().is_none());
    assert_eq!(session.progress(), 0);
}

#[tokio::test]
async fn service_error_surfaces_detail() {
    let config = spawn_server(Reply::Json(
        StatusCode::BAD_REQUEST,
        json!({"detail": "unsupported file type"}),
    ))
    .await;
    let mut controller = controller_for(&config);

    controller.select_file(Some(two_kb_text_file())).unwrap();
    controller.submit().await;

    let session = controller.session();
    assert_eq!(session.status(), UploadStatus::Failed);
    assert_eq!(session.error(), Some("unsupported file type"));
    assert_eq!(session.progress(), 0);
}

#[tokio::test]
async fn malformed_error_body_keeps_earlier_result() {
    let body = json!({"pages": 3, "summary": "ok"});
    let ok_config = spawn_server(Reply::Json(StatusCode::OK, body.clone())).await;
    let mut controller = controller_for(&ok_config);
    controller.select_file(Some(two_kb_text_file())).unwrap();
    controller.submit().await;
    assert_eq!(controller.session().result(), Some(&body));

    let broken = spawn_server(Reply::Text(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
    ))
    .await;
    controller.client = DocumentClient::new(&broken).expect("client");
    controller.submit().await;

    let session = controller.session();
    assert_eq!(session.status(), UploadStatus::Failed);
    assert_eq!(session.error(), Some(GENERIC_FAILURE_MESSAGE));
    assert_eq!(session.result(), Some(&body));
    assert_eq!(session.progress(), 0);
}

#[tokio::test]
async fn unreachable_server_reports_connection_message() {
    let mut controller = controller_for(&unreachable_server().await);

    controller.select_file(Some(two_kb_text_file())).unwrap();
    controller.submit().await;

    let session = controller.session();
    assert_eq!(session.status(), UploadStatus::Failed);
    assert_eq!(session.error(), Some(CONNECTION_FAILURE_MESSAGE));
}

#[tokio::test]
async fn failure_while_building_request_still_settles() {
    let mut controller = controller_for(&unreachable_server().await);
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("vanishing.txt");
    std::fs::write(&path, b"soon gone").expect("write");
    let file = FileHandle::from_path(&path).expect("handle");
    std::fs::remove_file(&path).expect("remove");

    controller.select_file(Some(file)).unwrap();
    controller.submit().await;

    let session = controller.session();
    assert_eq!(session.status(), UploadStatus::Failed);
    assert_eq!(session.progress(), 0);
    assert!(session
        .error()
        .is_some_and(|e| e.starts_with("Failed to read vanishing.txt")));
}

#[tokio::test]
async fn cancelled_submit_leaves_uploading() {
    let config = spawn_server(Reply::Stall).await;
    let mut controller = controller_for(&config);
    controller.select_file(Some(two_kb_text_file())).unwrap();

    let timed_out = tokio::time::timeout(Duration::from_millis(200), controller.submit()).await;

    assert!(timed_out.is_err());
    let session = controller.session();
    assert_eq!(session.status(), UploadStatus::Failed);
    assert_eq!(session.progress(), 0);
    assert_eq!(session.error(), Some(GENERIC_FAILURE_MESSAGE));
}

#[tokio::test]
async fn oversized_selection_blocks_submit() {
    let mut controller = controller_for(&unreachable_server().await);
    let huge = FileHandle {
        size: MAX_FILE_SIZE + 1,
        ..two_kb_text_file()
    };

    let err = controller.select_file(Some(huge)).unwrap_err();
    assert!(matches!(err, crate::upload::ValidationError::FileTooLarge { .. }));
    assert_eq!(
        controller.session().error(),
        Some("File size must be less than 10MB")
    );

    controller.submit().await;
    assert_eq!(
        controller.session().error(),
        Some("Please select a file before uploading.")
    );
    assert_eq!(controller.session().status(), UploadStatus::Idle);
}
