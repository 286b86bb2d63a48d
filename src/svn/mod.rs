pub mod svnlook;

pub use svnlook::SvnlookSource;

use crate::error::Result;
use std::collections::BTreeSet;

/// Directory-level changes a single revision introduced relative to its
/// predecessor. Paths are repository-relative, without leading or trailing
/// slashes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RevisionDiff {
    pub added_directories: BTreeSet<String>,
    pub deleted_directories: BTreeSet<String>,
}

/// Per-revision view of a version-controlled tree.
///
/// Implementations must report, for a directory added by copy, every
/// directory contained in the copied subtree, not just the copy root.
pub trait RevisionSource {
    /// Latest revision number of the repository.
    fn latest_revision(&self) -> Result<u64>;

    /// Directory additions and deletions of `revision` relative to
    /// `revision - 1`.
    fn diff(&self, revision: u64) -> Result<RevisionDiff>;

    /// Commit author of `revision`, if the repository records one.
    fn author(&self, revision: u64) -> Result<Option<String>>;
}
