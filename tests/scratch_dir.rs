//! Safety and idempotence properties of the scratch directory manager.

use sln_gen::scratch::{ScratchDir, ScratchDirError};

#[test]
fn rejects_absolute_name() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = ScratchDir::new(tmp.path(), "/tmp/scratch");

    assert!(dir.validate().is_err());
    assert!(matches!(
        dir.ensure_absent(),
        Err(ScratchDirError::UnsafePath(_))
    ));
    assert!(matches!(
        dir.ensure_present(),
        Err(ScratchDirError::UnsafePath(_))
    ));

    // Nothing was created under the base directory.
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn rejects_parent_traversal() {
    let tmp = tempfile::tempdir().unwrap();

    for name in ["../scratch", "a/../b", ".."] {
        let dir = ScratchDir::new(tmp.path(), name);
        let err = dir.validate().unwrap_err();
        assert!(
            err.to_string().contains("parent-directory"),
            "name {name:?} rejected for the wrong reason: {err}"
        );
        assert!(matches!(
            dir.ensure_present(),
            Err(ScratchDirError::UnsafePath(_))
        ));
    }

    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn rejects_names_without_a_real_component() {
    let tmp = tempfile::tempdir().unwrap();

    for name in ["", ".", "./."] {
        let dir = ScratchDir::new(tmp.path(), name);
        assert!(dir.validate().is_err(), "name {name:?} should be rejected");
    }
}

#[test]
fn accepts_plain_relative_names() {
    let tmp = tempfile::tempdir().unwrap();

    for name in ["__cmake", "build/solution", "./__cmake"] {
        let dir = ScratchDir::new(tmp.path(), name);
        assert!(dir.validate().is_ok(), "name {name:?} should be accepted");
    }
}

#[test]
fn ensure_absent_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = ScratchDir::new(tmp.path(), "__cmake");

    dir.ensure_absent().unwrap();
    dir.ensure_absent().unwrap();
    assert!(!dir.exists());

    // Also idempotent when the directory did exist.
    dir.ensure_present().unwrap();
    dir.ensure_absent().unwrap();
    dir.ensure_absent().unwrap();
    assert!(!dir.exists());
}

#[test]
fn ensure_present_keeps_existing_contents() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = ScratchDir::new(tmp.path(), "__cmake");

    dir.ensure_present().unwrap();
    let marker = dir.path().join("cache.txt");
    std::fs::write(&marker, "x").unwrap();

    dir.ensure_present().unwrap();
    assert!(marker.exists(), "ensure_present must not wipe the directory");
}

#[test]
fn present_then_absent_leaves_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = ScratchDir::new(tmp.path(), "__cmake");

    dir.ensure_present().unwrap();
    assert!(dir.exists());

    // Removal is recursive.
    std::fs::write(dir.path().join("generated.sln"), "x").unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();

    dir.ensure_absent().unwrap();
    assert!(!dir.exists());
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}
