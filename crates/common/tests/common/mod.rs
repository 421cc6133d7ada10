//! Shared test utilities for storage and upload integration tests
#![allow(dead_code)]

use common::devices::DeviceRegistry;
use common::storage::{FileStore, Folders, Settings};
use tokio::io::AsyncReadExt;
use common::upload::UploadedFile;
use tempfile::TempDir;

pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\x00\x00\x00\x01\x00\x00\x00\x01";
pub const PDF: &[u8] = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n<< /Type /Catalog >>\nendobj\n";
// local file header (stored, no flags) followed by a member name
pub const ZIP: &[u8] =
    b"PK\x03\x04\x14\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x09\x00\x00\x00hello.txt";

/// Set up settings backed by fresh upload and download folders inside a temp dir
pub fn setup_test_env() -> (Settings, DeviceRegistry, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let folders = Folders::new(
        temp_dir.path().join("upload"),
        temp_dir.path().join("download"),
    );
    let settings = Settings::new(folders).unwrap();
    (settings, DeviceRegistry::new(), temp_dir)
}

pub fn text_file(name: &str, body: &str) -> UploadedFile {
    UploadedFile::new(name, body.as_bytes().to_vec())
}

/// Full contents of `filename` as served by `store`
pub async fn read_download(store: &FileStore, filename: &str) -> Vec<u8> {
    let mut download = store.download(filename).await.unwrap();
    let mut contents = Vec::new();
    download.file.read_to_end(&mut contents).await.unwrap();
    assert_eq!(download.len, contents.len() as u64);
    contents
}
