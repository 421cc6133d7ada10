//! Integration tests for the persisted secret key

use common::crypto::SecretKey;
use tempfile::TempDir;

#[test]
fn test_missing_key_file_is_generated() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("key.txt");

    let key = SecretKey::load_or_generate(&path).unwrap();
    assert_eq!(key.as_str().len(), 64);
    assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, key.as_str());
}

#[test]
fn test_existing_key_is_preserved() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("key.txt");

    let first = SecretKey::load_or_generate(&path).unwrap();
    let second = SecretKey::load_or_generate(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_existing_contents_read_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("key.txt");
    std::fs::write(&path, "operator chosen key\n").unwrap();

    let key = SecretKey::load_or_generate(&path).unwrap();
    assert_eq!(key.as_str(), "operator chosen key\n");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "operator chosen key\n");
}

#[test]
fn test_deleting_key_file_regenerates() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("key.txt");

    let first = SecretKey::load_or_generate(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    let second = SecretKey::load_or_generate(&path).unwrap();

    assert_ne!(first, second);
    assert_eq!(second.as_str().len(), 64);
}

#[test]
fn test_unwritable_location_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no-such-dir").join("key.txt");

    assert!(SecretKey::load_or_generate(&path).is_err());
}
