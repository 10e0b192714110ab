use crate::error::AppError;
use crate::utils::validation::{sanitize_filename, validate_extension, validate_file_size};
use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::Html,
};
use bytes::Bytes;
use tracing::info;

/// Upload form served on GET, embedded at compile time. The form's drag-drop
/// and progress script is presentation only; every check it performs is
/// re-done authoritatively on the server.
const UPLOAD_FORM: &str = include_str!("../../static/upload.html");

#[utoipa::path(
    get,
    path = "/upload",
    responses(
        (status = 200, description = "HTML upload form", body = String, content_type = "text/html")
    ),
    tag = "upload"
)]
pub async fn show_upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

/// Bodies cut off by the transport-level size limit surface from the
/// multipart extractor as 413; report them with the same message as an
/// in-envelope oversize.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge
    } else {
        AppError::BadRequest(err.to_string())
    }
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = String, content_type = "multipart/form-data", description = "Form with a single `file` field"),
    responses(
        (status = 200, description = "Upload complete, body links to the stored object", body = String, content_type = "text/html"),
        (status = 400, description = "No valid file provided. / File type not allowed. / File too large."),
        (status = 500, description = "Storage-layer failure")
    ),
    tag = "upload"
)]
pub async fn upload_file(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        // First `file` field wins; everything else is drained and ignored.
        if field.name() != Some("file") || file.is_some() {
            continue;
        }

        let original = field.file_name().unwrap_or_default().trim().to_string();
        if original.is_empty() {
            return Err(AppError::NoValidFile);
        }

        let data = field.bytes().await.map_err(multipart_error)?;
        file = Some((original, data));
    }

    let (original, data) = file.ok_or(AppError::NoValidFile)?;

    let filename = sanitize_filename(&original).map_err(|_| AppError::NoValidFile)?;
    validate_extension(&filename).map_err(|_| AppError::FileTypeNotAllowed)?;
    validate_file_size(data.len(), state.config.max_file_size).map_err(|_| AppError::FileTooLarge)?;

    let size = data.len();
    state
        .storage
        .put_object(&filename, data)
        .await
        .map_err(AppError::Storage)?;

    info!(
        "File '{}' ({} bytes) uploaded to bucket '{}'",
        filename, size, state.config.bucket
    );

    let url = state.config.object_url(&filename);
    Ok(Html(format!(
        "Upload complete! <a href='{}' target='_blank'>View file</a>",
        url
    )))
}
