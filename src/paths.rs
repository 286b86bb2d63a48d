use crate::cli::Cli;
use crate::model::{PathEntry, TreeOutput, SCHEMA_VERSION};
use crate::render::{render_tree, RenderOptions};
use crate::replay;
use crate::svn::SvnlookSource;
use crate::tree::PathLifecycleTree;
use anyhow::Context;
use chrono::Utc;

pub fn exec(cli: &Cli) -> anyhow::Result<()> {
    let source = SvnlookSource::open(&cli.repository)?;
    let (tree, latest_revision) =
        replay::replay_paths(&source, !cli.no_progress).context("Failed to replay history")?;

    if cli.json {
        output_json(&tree, latest_revision, &source)?;
    } else {
        let options = RenderOptions {
            numbers: !cli.no_numbers,
            show_branches: cli.branches,
            show_tags: cli.tags,
            omission_markers: !cli.no_dots,
            flatten: cli.flatten,
            max_depth: cli.depth,
        };
        let stdout = std::io::stdout();
        render_tree(&mut stdout.lock(), &tree, latest_revision, &options)
            .context("Failed to write report")?;
    }
    Ok(())
}

fn output_json(
    tree: &PathLifecycleTree,
    latest_revision: u64,
    source: &SvnlookSource,
) -> anyhow::Result<()> {
    let entries = tree
        .walk()
        .map(|(id, _, path)| {
            let node = tree.node(id);
            PathEntry {
                path,
                added_on_revision: node.added_on_revision(),
                last_seen_revision: node.last_seen_revision(latest_revision),
                present: !node.is_deleted(),
            }
        })
        .collect();
    let output = TreeOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: source.path().to_string_lossy().to_string(),
        latest_revision,
        entries,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
