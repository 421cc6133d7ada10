use askama::Template;
use askama_axum::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::SignedCookieJar;

use crate::http_server::flash;

#[derive(Template)]
#[template(path = "admin/index.html")]
pub struct AdminTemplate {
    pub flashes: Vec<String>,
}

pub async fn handler(jar: SignedCookieJar) -> Response {
    let (jar, flashes) = flash::take(jar);
    (jar, AdminTemplate { flashes }).into_response()
}
