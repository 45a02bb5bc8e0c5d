use log::*;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OWNER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque process-unique token identifying the owner of a set of scratch
/// files. Owner identity must stay collision-free for the life of the
/// process, so ids are minted from a global counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    pub fn next() -> Self {
        return OwnerId(NEXT_OWNER_ID.fetch_add(1, Ordering::Relaxed));
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracks scratch files per owner and deletes them on demand.
///
/// Deletion is best-effort: a file that is already gone (or cannot be
/// removed) is logged and skipped, and the remaining files are still
/// deleted. Called only from the single thread driving the viewport loop.
#[derive(Debug, Default)]
pub struct TempfileLedger {
    tracked: HashMap<OwnerId, Vec<PathBuf>>,
}

impl TempfileLedger {
    pub fn new() -> Self {
        return TempfileLedger::default();
    }

    pub fn track(&mut self, owner: OwnerId, path: &Path) {
        let paths = self.tracked.entry(owner).or_default();
        paths.push(PathBuf::from(path));
    }

    /// Deletes every path tracked for `owner` and clears the entry,
    /// regardless of individual deletion failures.
    pub fn delete_files(&mut self, owner: OwnerId) {
        if let Some(paths) = self.tracked.remove(&owner) {
            for path in paths {
                if let Err(e) = fs::remove_file(&path) {
                    warn!("Error deleting file \"{}\": {}", path.display(), e);
                }
            }
        }
    }

    /// Deletes the tracked files of every owner. Used at shutdown so no
    /// scratch files leak across sessions.
    pub fn clear_all(&mut self) {
        let owners: Vec<OwnerId> = self.tracked.keys().copied().collect();
        for owner in owners {
            self.delete_files(owner);
        }
    }

    pub fn tracked(&self, owner: OwnerId) -> usize {
        return self.tracked.get(&owner).map_or(0, |paths| paths.len());
    }

    pub fn len(&self) -> usize {
        return self.tracked.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.tracked.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let a = OwnerId::next();
        let b = OwnerId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_002() {
        let mut ledger = TempfileLedger::new();
        let owner = OwnerId::next();
        ledger.track(owner, Path::new("/nonexistent/scratch_a.pfm"));
        ledger.track(owner, Path::new("/nonexistent/scratch_b.pfm"));
        assert_eq!(ledger.tracked(owner), 2);
        // Files do not exist; deletion must still clear the entry.
        ledger.delete_files(owner);
        assert_eq!(ledger.tracked(owner), 0);
        assert!(ledger.is_empty());
    }
}
