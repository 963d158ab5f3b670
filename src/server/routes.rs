//! # HTTP Routes
//!
//! | Method | Path            | Body                         |
//! |--------|-----------------|------------------------------|
//! | GET    | `/`             | -                            |
//! | POST   | `/encode/image` | multipart `file`, `message`  |
//! | POST   | `/decode/image` | multipart `file`             |
//! | POST   | `/encode/video` | - (501)                      |
//! | POST   | `/decode/video` | - (501)                      |
//! | POST   | `/encrypt/text` | JSON `{"text"}`              |
//! | POST   | `/decrypt/text` | JSON `{"encrypted"}`         |

use axum::{
    extract::{
        multipart::{Multipart, MultipartError},
        multipart::MultipartRejection,
        rejection::JsonRejection,
        DefaultBodyLimit, State,
    },
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use log::warn;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use uuid::Uuid;

use super::error::ApiError;
use super::server::ServerCore;
use crate::common::config::ServerSettings;
use crate::common::messages::{
    DecodeResponse, DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse,
};

pub struct AppState {
    pub core: ServerCore,
}

/// Build the application router with CORS and the upload size limit applied.
pub fn router(state: Arc<AppState>, settings: &ServerSettings) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/encode/image", post(encode_image_handler))
        .route("/decode/image", post(decode_image_handler))
        .route("/encode/video", post(encode_video_handler))
        .route("/decode/video", post(decode_video_handler))
        .route("/encrypt/text", post(encrypt_text_handler))
        .route("/decrypt/text", post(decrypt_text_handler))
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .layer(cors_layer(&settings.allowed_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

async fn index() -> &'static str {
    "Steganography Backend is running!"
}

/// Fields collected from an image upload form.
#[derive(Default)]
struct UploadForm {
    file: Option<Vec<u8>>,
    message: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Failed to read multipart data", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| upload_error("Failed to read image data", e))?;
                form.file = Some(data.to_vec());
            }
            "message" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| upload_error("Failed to read message", e))?;
                form.message = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn upload_error(context: &str, e: MultipartError) -> ApiError {
    let message = format!("{}: {}", context, e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::TooLarge(message)
    } else {
        ApiError::BadRequest(message)
    }
}

/// Map a rejected JSON body onto an `{"error"}` response.
fn json_error(e: JsonRejection) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::TooLarge(e.body_text())
    } else {
        ApiError::BadRequest(format!("Invalid JSON body: {}", e.body_text()))
    }
}

/// A request that is not a readable multipart form is missing its fields.
fn form_error(e: MultipartRejection, missing: &str) -> ApiError {
    warn!("Rejected upload: {}", e.body_text());
    ApiError::BadRequest(missing.to_string())
}

const MISSING_FILE_OR_MESSAGE: &str = "Invalid request: Missing file or message";
const MISSING_FILE: &str = "Invalid request: No file provided";

async fn encode_image_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let multipart = multipart.map_err(|e| form_error(e, MISSING_FILE_OR_MESSAGE))?;
    let form = read_upload(multipart).await?;

    let (image_data, message) = match (form.file, form.message) {
        (Some(file), Some(message)) => (file, message),
        _ => return Err(ApiError::BadRequest(MISSING_FILE_OR_MESSAGE.to_string())),
    };

    let encoded = state
        .core
        .encode_image(Uuid::new_v4(), image_data, message)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"encoded_image.png\"",
            ),
        ],
        encoded,
    ))
}

async fn decode_image_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DecodeResponse>, ApiError> {
    let multipart = multipart.map_err(|e| form_error(e, MISSING_FILE))?;
    let form = read_upload(multipart).await?;

    let image_data = form
        .file
        .ok_or_else(|| ApiError::BadRequest(MISSING_FILE.to_string()))?;

    let message = state.core.decode_image(Uuid::new_v4(), image_data).await?;

    Ok(Json(DecodeResponse { message }))
}

async fn encode_video_handler() -> ApiError {
    ApiError::NotImplemented(
        "Video encoding is not implemented in this version due to serverless constraints.",
    )
}

async fn decode_video_handler() -> ApiError {
    ApiError::NotImplemented(
        "Video decoding is not implemented in this version due to serverless constraints.",
    )
}

async fn encrypt_text_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EncryptRequest>, JsonRejection>,
) -> Result<Json<EncryptResponse>, ApiError> {
    let Json(request) = payload.map_err(json_error)?;
    let text = request
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No text provided".to_string()))?;

    let encrypted = state.core.encrypt_text(&text)?;

    Ok(Json(EncryptResponse { encrypted }))
}

async fn decrypt_text_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DecryptRequest>, JsonRejection>,
) -> Result<Json<DecryptResponse>, ApiError> {
    let Json(request) = payload.map_err(json_error)?;
    let token = request
        .encrypted
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No encrypted text provided".to_string()))?;

    let decrypted = state.core.decrypt_text(&token)?;

    Ok(Json(DecryptResponse { decrypted }))
}
