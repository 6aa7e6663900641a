use std::fs;

use feed_engine::{ensure_state_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("state").join("swipefeed");
    ensure_state_dir(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn state_dir_must_be_a_directory() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("session");
    fs::write(&file_path, "x").unwrap();
    assert!(ensure_state_dir(&file_path).is_err());
}

#[test]
fn write_replaces_previous_content() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("session.ron", "(user: None)").unwrap();
    let second = writer.write("session.ron", "(user: Some(()))").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "(user: Some(()))");
}

#[test]
fn remove_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    let path = writer.write("session.ron", "()").unwrap();

    writer.remove("session.ron").unwrap();
    assert!(!path.exists());
    writer.remove("session.ron").unwrap();
}
