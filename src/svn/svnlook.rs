use crate::error::{Result, SvnmapError};
use crate::svn::{RevisionDiff, RevisionSource};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

/// [`RevisionSource`] backed by the `svnlook` client, which inspects a local
/// repository root directly and needs no authentication.
#[derive(Debug)]
pub struct SvnlookSource {
    repo_path: PathBuf,
}

impl SvnlookSource {
    /// Open the repository at `location`, a filesystem path or `file://` URL.
    pub fn open(location: &str) -> Result<Self> {
        if let Some((scheme, _)) = location.split_once("://") {
            if !scheme.eq_ignore_ascii_case("file") {
                return Err(SvnmapError::RepositoryUnreachable(format!(
                    "{location}: only local repositories are supported, \
                     mirror the repository with svnsync first"
                )));
            }
        }
        let repo_path = PathBuf::from(
            location
                .strip_prefix("file://")
                .unwrap_or(location),
        );

        if repo_path.join(".svn").is_dir() {
            return Err(SvnmapError::InvalidLocation(format!(
                "{} is a working copy, not a repository root",
                repo_path.display()
            )));
        }
        if !repo_path.is_dir() {
            return Err(SvnmapError::RepositoryUnreachable(format!(
                "{} does not exist or is not a directory",
                repo_path.display()
            )));
        }

        Ok(Self { repo_path })
    }

    pub fn path(&self) -> &Path {
        &self.repo_path
    }

    fn run(&self, subcommand: &str, revision: Option<u64>, extra: &[&str]) -> Result<String> {
        let mut cmd = Command::new("svnlook");
        cmd.arg(subcommand);
        if let Some(rev) = revision {
            cmd.arg("--revision").arg(rev.to_string());
        }
        cmd.arg(&self.repo_path);
        cmd.args(extra);

        let output = cmd.output().map_err(|e| {
            SvnmapError::Backend(format!("failed to run svnlook {subcommand}: {e}"))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SvnmapError::RepositoryUnreachable(format!(
                "svnlook {subcommand} -r {}: {}",
                revision.map_or_else(|| "HEAD".to_string(), |r| r.to_string()),
                stderr.trim()
            )));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| SvnmapError::Parse(format!("svnlook {subcommand}: {e}")))
    }

    /// Every directory inside `dir` as of `revision`, `dir` itself included.
    fn directories_under(&self, revision: u64, dir: &str) -> Result<BTreeSet<String>> {
        let listing = self.run("tree", Some(revision), &["--full-paths", dir])?;
        Ok(parse_tree_listing(&listing))
    }
}

impl RevisionSource for SvnlookSource {
    fn latest_revision(&self) -> Result<u64> {
        let text = self.run("youngest", None, &[])?;
        text.trim()
            .parse()
            .map_err(|_| SvnmapError::Parse(format!("svnlook youngest: {:?}", text.trim())))
    }

    fn diff(&self, revision: u64) -> Result<RevisionDiff> {
        let changed = self.run("changed", Some(revision), &[])?;
        let (added_roots, deleted_directories) = parse_changed(&changed);

        // `svnlook changed` reports a directory copy as a single added root;
        // expand it so the copied subtree contributes every directory it
        // contains. Directories below an already expanded root are covered
        // by that listing.
        let mut added_directories = BTreeSet::new();
        let mut expanded: Vec<String> = Vec::new();
        for dir in &added_roots {
            if expanded.iter().any(|root| {
                dir.strip_prefix(root.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            }) {
                continue;
            }
            added_directories.extend(self.directories_under(revision, dir)?);
            expanded.push(dir.clone());
        }

        Ok(RevisionDiff {
            added_directories,
            deleted_directories,
        })
    }

    fn author(&self, revision: u64) -> Result<Option<String>> {
        let text = self.run("author", Some(revision), &[])?;
        let author = text.trim_end_matches(['\r', '\n']);
        if author.is_empty() {
            Ok(None)
        } else {
            Ok(Some(author.to_string()))
        }
    }
}

/// Parse `svnlook changed` output into added and deleted directory sets.
/// Lines carry a two-character action field, two spaces, then the path;
/// directory paths end with a slash, file paths are skipped.
fn parse_changed(text: &str) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut added = BTreeSet::new();
    let mut deleted = BTreeSet::new();
    for line in text.lines() {
        if line.len() <= 4 {
            continue;
        }
        let (flags, path) = line.split_at(4);
        let Some(dir) = path.strip_suffix('/') else {
            continue;
        };
        if dir.is_empty() {
            continue;
        }
        match flags.as_bytes()[0] {
            b'A' => {
                added.insert(dir.to_string());
            }
            b'D' => {
                deleted.insert(dir.to_string());
            }
            _ => {}
        }
    }
    (added, deleted)
}

/// Parse `svnlook tree --full-paths` output, keeping directory entries.
fn parse_tree_listing(text: &str) -> BTreeSet<String> {
    text.lines()
        .filter_map(|line| line.trim_end().strip_suffix('/'))
        .filter(|dir| !dir.is_empty())
        .map(|dir| dir.to_string())
        .collect()
}
