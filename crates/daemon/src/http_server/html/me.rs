use askama::Template;
use askama_axum::IntoResponse;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::cookie::SignedCookieJar;

use common::prelude::build_info;

use crate::http_server::{flash, Config};

#[derive(Template)]
#[template(path = "me.html")]
pub struct MeTemplate {
    pub version: String,
    pub listen_addr: String,
    pub flashes: Vec<String>,
}

pub async fn handler(Extension(config): Extension<Config>, jar: SignedCookieJar) -> Response {
    let (jar, flashes) = flash::take(jar);
    let template = MeTemplate {
        version: build_info().version.to_string(),
        listen_addr: config.listen_addr.to_string(),
        flashes,
    };
    (jar, template).into_response()
}
