use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use common::storage::StorageError;

mod admin;
mod download;
mod home;
mod me;
mod upload;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(home::handler))
        .route("/download/:filename", get(download::handler))
        .route("/upload", get(upload::form).post(upload::submit))
        .route("/me", get(me::handler))
        .route("/admin", get(admin::index::handler))
        .route("/admin/devices", get(admin::devices::handler))
        .route("/admin/remove_device/:ip", post(admin::devices::remove))
        .route("/admin/files", get(admin::files::handler))
        .route("/admin/delete_file/:filename", post(admin::files::delete))
        .route(
            "/admin/settings",
            get(admin::settings::handler).post(admin::settings::update),
        )
        .route("/admin/reports", get(admin::reports::handler))
        .with_state(state)
}

/// Errors shared by the page handlers
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("File not found")]
    FileNotFound,
    #[error("Device not found")]
    DeviceNotFound,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl PageError {
    /// Map a storage error from a single-file operation, folding every
    ///  flavour of "no such file" into [`PageError::FileNotFound`]
    pub fn from_file_op(err: StorageError) -> Self {
        if err.is_not_found() {
            PageError::FileNotFound
        } else {
            PageError::Storage(err)
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::FileNotFound | PageError::DeviceNotFound => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            PageError::Storage(e) => {
                tracing::error!("storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error: {}", e),
                )
                    .into_response()
            }
        }
    }
}
