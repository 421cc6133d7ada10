use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;
use tracing::instrument;

use super::PageError;
use crate::ServiceState;

#[instrument(skip(state))]
pub async fn handler(
    State(state): State<ServiceState>,
    Path(filename): Path<String>,
) -> Result<Response, PageError> {
    let download = state
        .settings()
        .file_store()
        .download(&filename)
        .await
        .map_err(PageError::from_file_op)?;

    let mime = mime_guess::from_path(&filename).first_or_octet_stream();
    tracing::info!(%filename, size = download.len, "serving download");

    let stream = ReaderStream::new(download.file);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CONTENT_LENGTH, download.len.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback name and the exact
///  UTF-8 name in `filename*`
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();

    if fallback == filename {
        return format!("attachment; filename=\"{}\"", filename);
    }

    // form encoding spells spaces as '+', while a literal '+' is already %2B
    let encoded: String = url::form_urlencoded::byte_serialize(filename.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}
