use crate::committers::CommitterLedger;
use crate::error::Result;
use crate::svn::RevisionSource;
use crate::tree::PathLifecycleTree;
use indicatif::{ProgressBar, ProgressStyle};

/// Replay every revision in order and accumulate path lifetimes.
///
/// Within one revision all adds are applied before any delete: the backend's
/// diff does not order the two kinds of events, and adds-first lets a path be
/// removed and re-added as a sibling rename-equivalent in a single revision.
/// Returns the tree together with the latest revision number.
pub fn replay_paths<S: RevisionSource>(
    source: &S,
    show_progress: bool,
) -> Result<(PathLifecycleTree, u64)> {
    let latest_revision = source.latest_revision()?;
    let pb = progress_bar(latest_revision, show_progress);

    let mut tree = PathLifecycleTree::new();
    for revision in 1..=latest_revision {
        let diff = source.diff(revision)?;
        for path in &diff.added_directories {
            tree.record_add(path, revision);
        }
        for path in &diff.deleted_directories {
            tree.record_delete(path, revision);
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok((tree, latest_revision))
}

/// Replay every revision in order and accumulate per-committer activity.
/// Revisions without an author are booked under `unknown_committer`.
pub fn replay_committers<S: RevisionSource>(
    source: &S,
    unknown_committer: &str,
    show_progress: bool,
) -> Result<(CommitterLedger, u64)> {
    let latest_revision = source.latest_revision()?;
    let pb = progress_bar(latest_revision, show_progress);

    let mut ledger = CommitterLedger::new();
    for revision in 1..=latest_revision {
        let author = source.author(revision)?;
        ledger.record(author.as_deref().unwrap_or(unknown_committer), revision);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok((ledger, latest_revision))
}

/// Progress goes to stderr so the report stream stays clean.
fn progress_bar(latest_revision: u64, show_progress: bool) -> ProgressBar {
    if !show_progress {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(latest_revision);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} {bar:40.cyan/blue} r{pos}/{len} ({percent}%, eta {eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message("Analyzing revisions");
    pb
}
