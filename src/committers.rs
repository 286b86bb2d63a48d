use crate::cli::Cli;
use crate::model::{CommitterEntry, CommitterOutput, SCHEMA_VERSION};
use crate::render::digit_count;
use crate::replay;
use crate::svn::SvnlookSource;
use anyhow::Context;
use chrono::Utc;
use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitterStats {
    pub first_revision: u64,
    pub last_revision: u64,
    pub commit_count: u64,
}

/// Per-committer activity summary, keyed by committer name.
#[derive(Debug, Default)]
pub struct CommitterLedger {
    entries: BTreeMap<String, CommitterStats>,
}

impl CommitterLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one commit by `name` on `revision`, extending the committer's
    /// `[first, last]` revision range.
    pub fn record(&mut self, name: &str, revision: u64) {
        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert(CommitterStats {
                first_revision: revision,
                last_revision: revision,
                commit_count: 0,
            });
        entry.first_revision = entry.first_revision.min(revision);
        entry.last_revision = entry.last_revision.max(revision);
        entry.commit_count += 1;
    }

    /// Entries sorted by committer name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommitterStats)> {
        self.entries.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn exec(cli: &Cli) -> anyhow::Result<()> {
    let source = SvnlookSource::open(&cli.repository)?;
    let (ledger, latest_revision) =
        replay::replay_committers(&source, &cli.unknown_committer, !cli.no_progress)
            .context("Failed to replay history")?;

    if cli.json {
        output_json(&ledger, latest_revision, &source)?;
    } else {
        let stdout = io::stdout();
        render_ledger(&mut stdout.lock(), &ledger, latest_revision, !cli.no_numbers)
            .context("Failed to write report")?;
    }
    Ok(())
}

fn output_json(
    ledger: &CommitterLedger,
    latest_revision: u64,
    source: &SvnlookSource,
) -> anyhow::Result<()> {
    let entries = ledger
        .iter()
        .map(|(name, stats)| CommitterEntry {
            name: name.to_string(),
            commit_count: stats.commit_count,
            first_revision: stats.first_revision,
            last_revision: stats.last_revision,
        })
        .collect();
    let output = CommitterOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: source.path().to_string_lossy().to_string(),
        latest_revision,
        entries,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print the committer summary: `commitCount (first; last)  name` per line,
/// sorted by name, or just the bare names when `numbers` is off.
pub fn render_ledger<W: Write>(
    out: &mut W,
    ledger: &CommitterLedger,
    latest_revision: u64,
    numbers: bool,
) -> io::Result<()> {
    let rev_width = digit_count(latest_revision);
    let count_width = ledger
        .iter()
        .map(|(_, stats)| digit_count(stats.commit_count))
        .max()
        .unwrap_or(1);

    for (name, stats) in ledger.iter() {
        if numbers {
            writeln!(
                out,
                "{:>cw$} ({:0rw$}; {:0rw$})  {}",
                stats.commit_count,
                stats.first_revision,
                stats.last_revision,
                name,
                cw = count_width,
                rw = rev_width,
            )?;
        } else {
            writeln!(out, "{name}")?;
        }
    }
    Ok(())
}
