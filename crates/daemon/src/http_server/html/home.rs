use std::net::SocketAddr;

use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{ConnectInfo, State};
use axum::response::Response;
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::instrument;

use super::PageError;
use crate::http_server::flash;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub files: Vec<String>,
    pub flashes: Vec<String>,
}

#[instrument(skip(state, jar))]
pub async fn handler(
    State(state): State<ServiceState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    jar: SignedCookieJar,
) -> Result<Response, PageError> {
    let files = state.settings().file_store().list_files().await?;

    let ip = addr.ip().to_canonical().to_string();
    let devices = state.devices();
    if devices.record_visit(&ip) {
        tracing::info!(%ip, "new device connected");
    }
    tracing::debug!(devices = ?devices.list_devices(), "connected devices");

    let (jar, flashes) = flash::take(jar);
    Ok((jar, IndexTemplate { files, flashes }).into_response())
}
