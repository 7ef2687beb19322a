//! Integration tests for tree cleanup against the host filesystem.
//!
//! These trees contain no mount points, so no privileges are needed.

mod common;

use std::fs;

use common::{count_entries, TreeFixture};
use scratchfs::{cleanup, exists, Error, MountScanner, Path, SystemFileSystem, TreeCleaner};

#[test]
fn test_cleanup_removes_whole_tree() {
    let tree = TreeFixture::new()
        .with_dir("a/b/c")
        .with_dir("empty")
        .with_file("top.txt", "top")
        .with_file("a/one.txt", "1")
        .with_file("a/b/two.txt", "2")
        .with_file("a/b/c/three.txt", "3")
        .build();

    let root = tree.root();
    let result = cleanup(&SystemFileSystem, &root).unwrap();

    assert!(result.unmounted.is_empty());
    assert_eq!(result.files_removed, 4);
    assert_eq!(result.directories_removed, 5);
    assert!(!exists(&SystemFileSystem, &root).unwrap());
    assert!(tree.outer().exists());
}

#[test]
fn test_cleanup_does_not_follow_symlinks() {
    let outside = tempfile::tempdir().unwrap();
    fs::write(outside.path().join("precious.txt"), "keep me").unwrap();

    let tree = TreeFixture::new()
        .with_file("inside.txt", "x")
        .with_symlink("escape", outside.path())
        .build();

    let result = cleanup(&SystemFileSystem, &tree.root()).unwrap();
    assert_eq!(result.files_removed, 2);
    assert!(!tree.std_root().exists());
    assert!(outside.path().join("precious.txt").exists());
}

#[test]
fn test_cleanup_refuses_root() {
    let err = cleanup(&SystemFileSystem, &Path::root()).unwrap_err();
    assert!(matches!(err, Error::RefusedRootDeletion));
}

#[test]
fn test_cleanup_missing_root() {
    let tree = TreeFixture::new().build();
    let missing = tree.child("nope");

    let err = cleanup(&SystemFileSystem, &missing).unwrap_err();
    assert_eq!(err.call(), Some("stat"));
    assert!(err.is_not_found());
}

#[test]
fn test_cleanup_single_file() {
    let tree = TreeFixture::new().with_file("only.txt", "x").build();
    let file = tree.child("only.txt");

    let result = cleanup(&SystemFileSystem, &file).unwrap();
    assert_eq!(result.files_removed, 1);
    assert_eq!(result.directories_removed, 0);
    assert!(tree.std_root().exists());
    assert_eq!(count_entries(tree.std_root()), 0);
}

#[test]
fn test_plan_then_execute() {
    let tree = TreeFixture::new()
        .with_dir("x/y")
        .with_file("x/y/z", "z")
        .build();
    let cleaner: TreeCleaner = TreeCleaner::new(&SystemFileSystem);

    let plan = cleaner.plan(&tree.root()).unwrap();
    assert!(plan.mount_points.is_empty());
    assert_eq!(plan.root, tree.root());
    assert_eq!(count_entries(tree.std_root()), 3);

    let result = cleaner.execute(&plan).unwrap();
    assert_eq!(result.total_removed(), 4);
    assert!(!tree.std_root().exists());
}

#[test]
fn test_scan_plain_tree_has_no_mounts() {
    let tree = TreeFixture::new()
        .with_dir("deep/er/still")
        .with_file("deep/f", "")
        .build();

    let mounts = MountScanner::new(&SystemFileSystem).scan(&tree.root()).unwrap();
    assert!(mounts.is_empty());
}
