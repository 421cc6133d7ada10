use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::State;
use axum::response::Response;
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::instrument;

use common::report::Report;

use crate::http_server::flash;
use crate::http_server::html::PageError;
use crate::ServiceState;

#[derive(Template)]
#[template(path = "admin/reports.html")]
pub struct ReportsTemplate {
    pub total_devices: usize,
    pub total_files: usize,
    pub flashes: Vec<String>,
}

#[instrument(skip(state, jar))]
pub async fn handler(
    State(state): State<ServiceState>,
    jar: SignedCookieJar,
) -> Result<Response, PageError> {
    let report = Report::collect(state.devices(), &state.settings().file_store()).await?;
    let (jar, flashes) = flash::take(jar);
    let template = ReportsTemplate {
        total_devices: report.device_count,
        total_files: report.file_count,
        flashes,
    };
    Ok((jar, template).into_response())
}
