//! Integration tests for the VFS engine
//!
//! These tests validate the operation contract end to end:
//! - Creation order and uniqueness
//! - Path navigation with `.` and `..`
//! - Whole-content read/write
//! - Deletion and reset

use services_vfs::{LogicalClock, MemoryStore, VfsConfig, VfsEngine, VfsError, VfsOperations, WriteMode};
use vfs_tree::Entry;

fn engine() -> VfsEngine<MemoryStore> {
    VfsEngine::init_with(
        MemoryStore::new(),
        VfsConfig::default(),
        Box::new(LogicalClock::default()),
    )
}

fn names(entries: &[Entry]) -> Vec<String> {
    entries.iter().map(|e| e.name.clone()).collect()
}

#[test]
fn test_list_returns_entries_in_creation_order() {
    let mut vfs = engine();
    vfs.change_directory("/").unwrap();
    vfs.mkdir("scratch").unwrap();
    vfs.change_directory("scratch").unwrap();

    let created = ["zeta", "alpha", "mid", "beta"];
    for (i, name) in created.iter().enumerate() {
        if i % 2 == 0 {
            vfs.create(name, "").unwrap();
        } else {
            vfs.mkdir(name).unwrap();
        }
    }

    assert_eq!(names(vfs.list(None).unwrap()), created);
}

#[test]
fn test_duplicate_create_fails_and_keeps_original() {
    let mut vfs = engine();
    vfs.create("dup.txt", "original").unwrap();

    assert_eq!(
        vfs.create("dup.txt", "replacement"),
        Err(VfsError::AlreadyExists("dup.txt".to_string()))
    );
    assert_eq!(
        vfs.mkdir("dup.txt"),
        Err(VfsError::AlreadyExists("dup.txt".to_string()))
    );
    assert_eq!(vfs.read("dup.txt"), Ok("original"));
}

#[test]
fn test_dotdot_at_root_is_noop() {
    let mut vfs = engine();
    vfs.change_directory("/").unwrap();

    vfs.change_directory("..").unwrap();
    assert_eq!(vfs.current_path_string(), "/");
    assert!(vfs.working_location().is_empty());

    vfs.change_directory("..").unwrap();
    assert_eq!(vfs.current_path_string(), "/");
}

#[test]
fn test_relative_navigation_matches_absolute() {
    let mut vfs = engine();
    vfs.change_directory("/").unwrap();
    vfs.mkdir("a").unwrap();
    vfs.change_directory("a").unwrap();
    vfs.mkdir("b").unwrap();
    vfs.mkdir("c").unwrap();

    vfs.change_directory("/a/b").unwrap();
    vfs.change_directory("../c").unwrap();
    let relative = vfs.working_location().to_vec();

    vfs.change_directory("/").unwrap();
    vfs.change_directory("/a/c").unwrap();
    assert_eq!(vfs.working_location(), relative.as_slice());
    assert_eq!(vfs.current_path_string(), "/a/c");
}

#[test]
fn test_dot_and_repeated_slashes() {
    let mut vfs = engine();
    vfs.change_directory("//var///./log/").unwrap();
    assert_eq!(vfs.current_path_string(), "/var/log");

    vfs.change_directory(".").unwrap();
    assert_eq!(vfs.current_path_string(), "/var/log");

    vfs.change_directory("").unwrap();
    assert_eq!(vfs.current_path_string(), "/var/log");
}

#[test]
fn test_write_then_read_and_append() {
    let mut vfs = engine();

    vfs.write("out.txt", "X", WriteMode::Replace).unwrap();
    assert_eq!(vfs.read("out.txt"), Ok("X"));

    vfs.write("out.txt", "Y", WriteMode::Append).unwrap();
    assert_eq!(vfs.read("out.txt"), Ok("X\nY"));
    assert_eq!(vfs.stat("out.txt").unwrap().size(), Some(3));

    vfs.write("out.txt", "Z", WriteMode::Replace).unwrap();
    assert_eq!(vfs.read("out.txt"), Ok("Z"));
}

#[test]
fn test_write_updates_modified() {
    let mut vfs = engine();
    vfs.create("f", "a").unwrap();
    let created = vfs.stat("f").unwrap().modified;

    vfs.write("f", "b", WriteMode::Replace).unwrap();
    let file = vfs.stat("f").unwrap();
    assert!(file.modified > created);
    assert_eq!(file.created, created);
}

#[test]
fn test_delete_then_read_is_not_found() {
    let mut vfs = engine();
    vfs.delete("notes.txt").unwrap();

    assert_eq!(
        vfs.read("notes.txt"),
        Err(VfsError::NotFound("notes.txt".to_string()))
    );
    assert_eq!(names(vfs.list(None).unwrap()), vec!["readme.txt"]);
}

#[test]
fn test_delete_missing_leaves_directory_unchanged() {
    let mut vfs = engine();
    let before = vfs.list(None).unwrap().to_vec();

    assert_eq!(
        vfs.delete("ghost"),
        Err(VfsError::NotFound("ghost".to_string()))
    );
    assert_eq!(vfs.list(None).unwrap(), before.as_slice());
}

#[test]
fn test_delete_directory_removes_subtree() {
    let mut vfs = engine();
    vfs.mkdir("deep").unwrap();
    vfs.change_directory("deep").unwrap();
    vfs.mkdir("deeper").unwrap();
    vfs.change_directory("..").unwrap();

    vfs.delete("deep").unwrap();
    assert!(vfs.stat("deep").is_err());
    assert!(vfs.change_directory("deep/deeper").is_err());
}

#[test]
fn test_root_cannot_be_deleted() {
    let mut vfs = engine();
    vfs.change_directory("/").unwrap();

    assert_eq!(
        vfs.delete("/"),
        Err(VfsError::InvalidName("/".to_string()))
    );
    assert_eq!(vfs.tree().name, "/");
    assert_eq!(vfs.list(None).unwrap().len(), 4);
}

#[test]
fn test_reset_restores_seed() {
    let mut vfs = engine();
    vfs.delete("readme.txt").unwrap();
    vfs.delete("notes.txt").unwrap();
    vfs.change_directory("/").unwrap();
    vfs.delete("home").unwrap();
    vfs.mkdir("junk").unwrap();

    vfs.reset();

    let home = names(vfs.list(Some("/home/user")).unwrap());
    assert!(home.contains(&"readme.txt".to_string()));
    assert!(home.contains(&"notes.txt".to_string()));
    assert!(vfs.stat("/junk").is_err());
    assert_eq!(vfs.current_path_string(), "/home/user");
}

#[test]
fn test_scenario_mkdir_cd_create_list() {
    let mut vfs = engine();
    vfs.change_directory("/").unwrap();

    vfs.mkdir("x").unwrap();
    vfs.change_directory("x").unwrap();
    vfs.create("f", "hi").unwrap();
    vfs.change_directory("..").unwrap();

    let entries = vfs.list(Some("x")).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "f");
    assert!(entries[0].is_file());
    assert_eq!(entries[0].content(), Some("hi"));
    assert_eq!(entries[0].size(), Some(2));
}

#[test]
fn test_list_paths() {
    let vfs = engine();

    assert_eq!(
        names(vfs.list(Some("/")).unwrap()),
        vec!["bin", "etc", "home", "var"]
    );
    assert_eq!(names(vfs.list(Some("../..")).unwrap()), names(vfs.list(Some("/")).unwrap()));
    assert_eq!(names(vfs.list(Some("/var/log")).unwrap()), vec!["system.log"]);
    assert!(matches!(vfs.list(Some("/var/nope")), Err(VfsError::NotFound(_))));
    assert!(matches!(vfs.list(Some("/etc/passwd")), Err(VfsError::NotFound(_))));
}

#[test]
fn test_operations_do_not_move_location() {
    let mut vfs = engine();
    vfs.create("a", "").unwrap();
    vfs.mkdir("b").unwrap();
    vfs.write("a", "x", WriteMode::Append).unwrap();
    vfs.delete("b").unwrap();
    let _ = vfs.list(Some("/"));
    let _ = vfs.stat("/etc");

    assert_eq!(vfs.current_path_string(), "/home/user");
}
