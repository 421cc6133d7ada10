use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Path, State};
use axum::response::{Redirect, Response};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::instrument;

use crate::http_server::flash;
use crate::http_server::html::PageError;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "admin/files.html")]
pub struct FilesTemplate {
    pub files: Vec<String>,
    pub flashes: Vec<String>,
}

#[instrument(skip(state, jar))]
pub async fn handler(
    State(state): State<ServiceState>,
    jar: SignedCookieJar,
) -> Result<Response, PageError> {
    let files = state.settings().file_store().list_files().await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, FilesTemplate { files, flashes }).into_response())
}

#[instrument(skip(state, jar))]
pub async fn delete(
    State(state): State<ServiceState>,
    Path(filename): Path<String>,
    jar: SignedCookieJar,
) -> Result<Response, PageError> {
    state
        .settings()
        .file_store()
        .delete_file(&filename)
        .await
        .map_err(PageError::from_file_op)?;

    let jar = flash::push(jar, [format!("Deleted file {}.", filename)]);
    Ok((jar, Redirect::to("/admin/files")).into_response())
}
