//! Integration tests for metadata probes and directory listings on the host.

mod common;

use std::fs;
use std::os::unix::fs::PermissionsExt;

use common::TreeFixture;
use scratchfs::{Directory, FileInfo, FileType, Path, SystemFileSystem};

#[test]
fn test_listing_includes_pseudo_entries_and_children() {
    let tree = TreeFixture::new()
        .with_dir("sub")
        .with_file("file.txt", "hello")
        .with_symlink("link", "file.txt")
        .build();

    let dir = Directory::open(&SystemFileSystem, &tree.root()).unwrap();
    let names: Vec<String> = dir.names().into_iter().collect();
    assert_eq!(names, vec![".", "..", "file.txt", "link", "sub"]);

    assert!(dir.get(".").unwrap().is_directory());
    assert!(dir.get("..").unwrap().is_directory());
    assert_eq!(dir.get("sub").unwrap().file_type(), FileType::Directory);
    assert_eq!(dir.get("file.txt").unwrap().file_type(), FileType::Regular);
    assert_eq!(dir.get("link").unwrap().file_type(), FileType::Symlink);
    assert_eq!(dir.children().count(), 3);
}

#[test]
fn test_entries_share_the_root_device() {
    let tree = TreeFixture::new().with_dir("a").with_file("b", "").build();

    let root = FileInfo::probe(&SystemFileSystem, &tree.root()).unwrap();
    let dir = Directory::open(&SystemFileSystem, &tree.root()).unwrap();
    for (_, info) in dir.children() {
        assert_eq!(info.device(), root.device());
    }
}

#[test]
fn test_probe_reports_permission_bits() {
    let tree = TreeFixture::new().with_file("script.sh", "#!/bin/sh\n").build();
    let path = tree.std_root().join("script.sh");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o750)).unwrap();

    let info = FileInfo::probe(&SystemFileSystem, &tree.child("script.sh")).unwrap();
    assert_eq!(info.mode(), 0o750);
    assert!(info.is_owner_executable());
    assert!(info.is_group_readable());
    assert!(!info.is_group_writable());
    assert!(!info.is_other_readable());
}

#[test]
fn test_probe_of_dangling_symlink_succeeds() {
    let tree = TreeFixture::new()
        .with_symlink("dangling", "does-not-exist")
        .build();

    let info = FileInfo::probe(&SystemFileSystem, &tree.child("dangling")).unwrap();
    assert_eq!(info.file_type(), FileType::Symlink);
}

#[test]
fn test_open_missing_directory_fails() {
    let tree = TreeFixture::new().build();
    let err = Directory::open(&SystemFileSystem, &tree.child("missing")).unwrap_err();
    assert_eq!(err.call(), Some("opendir"));
    assert!(err.is_not_found());
}

#[test]
fn test_open_file_as_directory_fails() {
    let tree = TreeFixture::new().with_file("plain", "").build();
    let err = Directory::open(&SystemFileSystem, &tree.child("plain")).unwrap_err();
    assert_eq!(err.call(), Some("opendir"));
}

#[test]
fn test_fifo_is_recognized() {
    let tree = TreeFixture::new().build();
    let fifo = tree.std_root().join("pipe");
    let status = std::process::Command::new("mkfifo").arg(&fifo).status();
    if !matches!(status, Ok(s) if s.success()) {
        return;
    }

    let info = FileInfo::probe(&SystemFileSystem, &Path::from_std_path(&fifo).unwrap()).unwrap();
    assert_eq!(info.file_type(), FileType::Fifo);
    assert_eq!(info.file_type().to_string(), "fifo");
}
