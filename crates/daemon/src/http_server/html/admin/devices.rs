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
#[template(path = "admin/devices.html")]
pub struct DevicesTemplate {
    pub devices: Vec<String>,
    pub flashes: Vec<String>,
}

#[instrument(skip(state, jar))]
pub async fn handler(State(state): State<ServiceState>, jar: SignedCookieJar) -> Response {
    let (jar, flashes) = flash::take(jar);
    let template = DevicesTemplate {
        devices: state.devices().list_devices(),
        flashes,
    };
    (jar, template).into_response()
}

#[instrument(skip(state, jar))]
pub async fn remove(
    State(state): State<ServiceState>,
    Path(ip): Path<String>,
    jar: SignedCookieJar,
) -> Result<Response, PageError> {
    if !state.devices().remove_device(&ip) {
        return Err(PageError::DeviceNotFound);
    }

    tracing::info!(%ip, "removed device");
    let jar = flash::push(jar, [format!("Removed device {}.", ip)]);
    Ok((jar, Redirect::to("/admin/devices")).into_response())
}
