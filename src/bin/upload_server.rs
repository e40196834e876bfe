// upload_server.rs — upload + serving collaborator for the panorama viewer

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::extract::{Multipart, Path as AxumPath, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use panowalk::{StoreError, UploadStore};

#[derive(Clone)]
struct AppState {
    store: UploadStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let upload_root =
        env::var("PANOWALK_UPLOAD_ROOT").unwrap_or_else(|_| "data/uploads".to_string());
    let addr: SocketAddr = env::var("PANOWALK_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
        .parse()?;

    let state = AppState {
        store: UploadStore::open(PathBuf::from(upload_root))?,
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/upload", post(upload))
        .route("/uploads/:filename", get(serve_upload))
        .route("/process_stitched_image", post(process_stitched_image))
        .layer(CorsLayer::permissive())
        .with_state(state);

    info!("upload server listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or_default().to_string();
            match field.bytes().await {
                Ok(bytes) => file = Some((name, bytes.to_vec())),
                Err(err) => {
                    error!("upload body read failed: {err}");
                    return error_response(StatusCode::BAD_REQUEST, "No file part");
                }
            }
            break;
        }
    }

    let Some((name, bytes)) = file else {
        return error_response(StatusCode::BAD_REQUEST, "No file part");
    };

    match state.store.store(&name, &bytes) {
        Ok(stored) => {
            info!("stored upload {name:?} as {}", stored.file_name);
            (
                StatusCode::OK,
                Json(json!({
                    "message": "File uploaded successfully",
                    "file_name": stored.file_name,
                    "url": format!("/uploads/{}", stored.file_name),
                })),
            )
                .into_response()
        }
        Err(err @ (StoreError::EmptyFileName | StoreError::InvalidFileType)) => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(err) => {
            error!("upload store failed: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "upload failed")
        }
    }
}

async fn serve_upload(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
) -> Response {
    match state.store.read(&filename) {
        Ok(bytes) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(content_type_for(&filename)),
            );
            (StatusCode::OK, headers, bytes).into_response()
        }
        Err(err) => {
            error!("serve {filename:?} failed: {err}");
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
    }
}

fn content_type_for(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Deserialize)]
struct StitchRequest {
    filepath: PathBuf,
}

async fn process_stitched_image(
    State(state): State<AppState>,
    Json(req): Json<StitchRequest>,
) -> Response {
    match state.store.import_stitched(&req.filepath) {
        Ok(stored) => (
            StatusCode::OK,
            Json(json!({
                "message": "Image processed successfully",
                "url": format!("/uploads/{}", stored.file_name),
            })),
        )
            .into_response(),
        Err(StoreError::MissingSource(path)) => error_response(
            StatusCode::NOT_FOUND,
            &format!("File does not exist: {}", path.display()),
        ),
        Err(err) => {
            error!("stitched import failed: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "copy failed")
        }
    }
}
