use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::response::{Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::instrument;

use common::storage::SettingsUpdate;

use crate::http_server::flash;
use crate::http_server::html::PageError;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "admin/settings.html")]
pub struct SettingsTemplate {
    pub upload_folder: String,
    pub download_folder: String,
    pub flashes: Vec<String>,
}

#[instrument(skip(state, jar))]
pub async fn handler(State(state): State<ServiceState>, jar: SignedCookieJar) -> Response {
    let folders = state.settings().folders();
    let (jar, flashes) = flash::take(jar);
    let template = SettingsTemplate {
        upload_folder: folders.upload_folder.display().to_string(),
        download_folder: folders.download_folder.display().to_string(),
        flashes,
    };
    (jar, template).into_response()
}

#[instrument(skip(state, jar))]
pub async fn update(
    State(state): State<ServiceState>,
    jar: SignedCookieJar,
    Form(update): Form<SettingsUpdate>,
) -> Result<Response, PageError> {
    state.settings().update(update).await?;

    let jar = flash::push(jar, ["Settings updated successfully!"]);
    Ok((jar, Redirect::to("/admin/settings")).into_response())
}
