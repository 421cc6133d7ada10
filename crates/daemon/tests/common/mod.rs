//! Shared helpers for driving the router in-process
#![allow(dead_code)]

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{header, Request, Response};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use ::common::crypto::SecretKey;
use ::common::storage::Folders;
use zap_daemon::http_server::{self, Config};
use zap_daemon::ServiceState;

pub const BOUNDARY: &str = "zap-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: ServiceState,
    pub temp_dir: TempDir,
}

/// Router over fresh folders, with every request arriving from `peer`
pub fn setup_app(peer: SocketAddr) -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let folders = Folders::new(
        temp_dir.path().join("upload"),
        temp_dir.path().join("download"),
    );
    let state = ServiceState::new(SecretKey::generate(), folders).unwrap();
    let config = Config::new("127.0.0.1:5000".parse().unwrap());
    let router = http_server::router(config, state.clone()).layer(MockConnectInfo(peer));

    TestApp {
        router,
        state,
        temp_dir,
    }
}

pub fn peer(ip: [u8; 4]) -> SocketAddr {
    SocketAddr::from((ip, 40000))
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str) -> Response<Body> {
        self.send(Request::post(uri).body(Body::empty()).unwrap())
            .await
    }
}

/// Encode `(field, filename, bytes)` parts as a multipart/form-data body
pub fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, filename, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub fn multipart_request(uri: &str, parts: &[(&str, &str, &[u8])]) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The `name=value` pair of the flash cookie set by `response`, if any
pub fn flash_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with("_flashes="))
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
        .next()
}

/// Follow a redirect by hand, replaying the flash cookie
pub async fn follow(app: &TestApp, response: Response<Body>) -> String {
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let cookie = flash_cookie(&response).expect("redirect should carry flashes");
    let page = app
        .send(
            Request::get(location)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    body_text(page).await
}
