//! Integration tests for the sandbox lifecycle on the host filesystem.
//!
//! Entering a sandbox changes the process-wide working directory, so every
//! test here runs serially.

use serial_test::serial;
use std::fs;

use scratchfs::config::Config;
use scratchfs::{
    change_directory, create_temp_directory, exists, get_current_directory, Path, Sandbox,
    SystemFileSystem,
};

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        work_directory: Some(dir.to_str().unwrap().to_string()),
        template: Some("sandbox.XXXXXX".to_string()),
        log_mode: None,
    }
}

#[test]
#[serial]
fn test_sandbox_full_lifecycle() {
    let work = tempfile::tempdir().unwrap();
    let work_path = work.path().canonicalize().unwrap();
    let before = get_current_directory(&SystemFileSystem).unwrap();

    let mut sandbox = Sandbox::create(&SystemFileSystem, &config_in(&work_path)).unwrap();
    let root = sandbox.root().clone();
    assert!(exists(&SystemFileSystem, &root).unwrap());

    sandbox.enter().unwrap();
    assert_eq!(get_current_directory(&SystemFileSystem).unwrap(), root);

    // Relative writes land inside the sandbox.
    fs::create_dir("output").unwrap();
    fs::write("output/result.txt", "ok").unwrap();
    fs::write("log.txt", "done").unwrap();

    let result = sandbox.cleanup().unwrap();
    assert_eq!(result.files_removed, 2);
    assert_eq!(result.directories_removed, 2);
    assert!(!exists(&SystemFileSystem, &root).unwrap());
    assert_eq!(get_current_directory(&SystemFileSystem).unwrap(), before);
}

#[test]
#[serial]
fn test_sandbox_cleanup_without_entering() {
    let work = tempfile::tempdir().unwrap();
    let sandbox = Sandbox::create(&SystemFileSystem, &config_in(work.path())).unwrap();
    let root = sandbox.root().clone();

    sandbox.cleanup().unwrap();
    assert!(!exists(&SystemFileSystem, &root).unwrap());
    assert!(work.path().exists());
}

#[test]
#[serial]
fn test_create_temp_directory_is_unique() {
    let work = tempfile::tempdir().unwrap();
    let template = Path::from_std_path(work.path())
        .unwrap()
        .join("t.XXXXXX")
        .unwrap();

    let a = create_temp_directory(&SystemFileSystem, &template).unwrap();
    let b = create_temp_directory(&SystemFileSystem, &template).unwrap();
    assert_ne!(a, b);
    assert!(exists(&SystemFileSystem, &a).unwrap());
    assert!(exists(&SystemFileSystem, &b).unwrap());
}

#[test]
#[serial]
fn test_change_directory_skips_when_already_there() {
    let current = get_current_directory(&SystemFileSystem).unwrap();
    let previous = change_directory(&SystemFileSystem, &current).unwrap();
    assert_eq!(previous, current);
}
