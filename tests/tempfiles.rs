use filmview::core::tempfiles::*;

use std::fs::File;
use std::path::{Path, PathBuf};

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap();
    return path;
}

#[test]
fn delete_files_removes_only_the_owner() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = TempfileLedger::new();

    let a = OwnerId::next();
    let b = OwnerId::next();
    let a1 = touch(dir.path(), "a1.pfm");
    let a2 = touch(dir.path(), "a2.pfm");
    let b1 = touch(dir.path(), "b1.pfm");
    ledger.track(a, &a1);
    ledger.track(a, &a2);
    ledger.track(b, &b1);

    ledger.delete_files(a);

    assert!(!a1.exists());
    assert!(!a2.exists());
    assert!(b1.exists());
    assert_eq!(ledger.tracked(a), 0);
    assert_eq!(ledger.tracked(b), 1);
}

#[test]
fn delete_files_survives_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = TempfileLedger::new();

    let owner = OwnerId::next();
    let present = touch(dir.path(), "present.pfm");
    let missing = dir.path().join("already_gone.pfm");
    ledger.track(owner, &missing);
    ledger.track(owner, &present);

    // The missing file is logged and skipped; the present one must still
    // be deleted and the entry cleared.
    ledger.delete_files(owner);

    assert!(!present.exists());
    assert_eq!(ledger.tracked(owner), 0);
}

#[test]
fn clear_all_empties_every_owner() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = TempfileLedger::new();

    let mut paths = Vec::new();
    for i in 0..3 {
        let owner = OwnerId::next();
        for j in 0..2 {
            let path = touch(dir.path(), &format!("file_{}_{}.pfm", i, j));
            ledger.track(owner, &path);
            paths.push(path);
        }
    }
    assert_eq!(ledger.len(), 3);

    ledger.clear_all();

    assert!(ledger.is_empty());
    for path in paths {
        assert!(!path.exists());
    }
}
