use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Redirect, Response};
use axum_extra::extract::cookie::SignedCookieJar;
use http_body_util::LengthLimitError;
use tracing::instrument;

use common::upload::{handle_upload, Rejection, UploadedFile};

use crate::http_server::{flash, MAX_CONTENT_LENGTH};
use crate::ServiceState;

/// Multipart field carrying the uploaded files
const FILES_FIELD: &str = "files";

/// Rejections listed one by one; the rest are summarized in a single line
const MAX_REJECTIONS_SHOWN: usize = 10;

#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
    pub flashes: Vec<String>,
}

pub async fn form(jar: SignedCookieJar) -> Response {
    let (jar, flashes) = flash::take(jar);
    (jar, UploadTemplate { flashes }).into_response()
}

#[instrument(skip(state, jar, multipart))]
pub async fn submit(
    State(state): State<ServiceState>,
    jar: SignedCookieJar,
    mut multipart: Multipart,
) -> Result<Response, UploadError> {
    let mut files: Option<Vec<UploadedFile>> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        files.get_or_insert_with(Vec::new).push(UploadedFile { filename, data });
    }

    let Some(files) = files else {
        let jar = flash::push(jar, ["No files were sent"]);
        return Ok((jar, Redirect::to("/")).into_response());
    };

    tracing::info!("Uploading {} file(s)", files.len());
    let outcome = handle_upload(&state.settings().upload_folder(), files).await;

    let mut messages: Vec<String> = outcome
        .rejections
        .iter()
        .take(MAX_REJECTIONS_SHOWN)
        .map(ToString::to_string)
        .collect();
    let hidden = outcome.rejections.len().saturating_sub(MAX_REJECTIONS_SHOWN);
    if hidden > 0 {
        messages.push(format!("...and {} more file(s) rejected", hidden));
    }
    let batch_refused = outcome
        .rejections
        .iter()
        .any(|r| matches!(r, Rejection::TooManyFiles { .. }));
    if !batch_refused {
        messages.push(format!(
            "Uploaded {} file(s) successfully!",
            outcome.accepted_count()
        ));
    }

    let jar = flash::push(jar, messages);
    Ok((jar, Redirect::to("/")).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),
}

impl UploadError {
    /// True when the body was cut off by the request size limit. Bodies
    ///  without a `Content-Length` only hit the limit mid-stream, where the
    ///  multipart parser reports it as a generic read failure.
    fn is_length_limit(&self) -> bool {
        let UploadError::Multipart(e) = self;
        let mut source: Option<&(dyn std::error::Error + 'static)> = Some(e);
        while let Some(err) = source {
            if err.is::<LengthLimitError>() {
                return true;
            }
            source = err.source();
        }
        false
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        if self.is_length_limit() {
            tracing::warn!(
                "rejected upload request: body exceeds {} bytes",
                MAX_CONTENT_LENGTH
            );
            return (StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded").into_response();
        }

        match self {
            UploadError::Multipart(e) => {
                tracing::warn!("rejected upload request: {}", e);
                (e.status(), e.body_text()).into_response()
            }
        }
    }
}
