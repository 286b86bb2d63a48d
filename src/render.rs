use crate::tree::{NodeId, PathLifecycleTree, ROOT};
use std::io::{self, Write};

/// Depth trackers start far enough below the root that the two-levels-below
/// suppression rule can never fire before a `branches`/`tags` folder has
/// actually been seen.
const UNSEEN_LEVEL: i32 = -3;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Annotate each path with its existence interval.
    pub numbers: bool,
    /// Descend into the content of `branches` folders.
    pub show_branches: bool,
    /// Descend into the content of `tags` folders.
    pub show_tags: bool,
    /// Print `[..]` where a subtree is suppressed.
    pub omission_markers: bool,
    /// Print full paths instead of an indented tree.
    pub flatten: bool,
    /// Maximum tree depth; values below 1 mean unlimited.
    pub max_depth: i32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            numbers: true,
            show_branches: false,
            show_tags: false,
            omission_markers: true,
            flatten: false,
            max_depth: 0,
        }
    }
}

/// Walk the finished tree and print one line per visible path, top-level
/// paths first, children sorted by name under their parent.
pub fn render_tree<W: Write>(
    out: &mut W,
    tree: &PathLifecycleTree,
    latest_revision: u64,
    options: &RenderOptions,
) -> io::Result<()> {
    let ctx = RenderContext {
        tree,
        latest_revision,
        revision_digits: digit_count(latest_revision),
        options,
    };
    render_children(out, &ctx, ROOT, 0, UNSEEN_LEVEL, UNSEEN_LEVEL, "")
}

struct RenderContext<'a> {
    tree: &'a PathLifecycleTree,
    latest_revision: u64,
    revision_digits: usize,
    options: &'a RenderOptions,
}

/// Render the children of `parent`, which print at `depth`. The branch and
/// tag levels record the depth of the nearest `branches`/`tags` ancestor and
/// are passed by value so each subtree sees only its own ancestry.
fn render_children<W: Write>(
    out: &mut W,
    ctx: &RenderContext<'_>,
    parent: NodeId,
    depth: i32,
    branch_level: i32,
    tag_level: i32,
    parent_path: &str,
) -> io::Result<()> {
    let options = ctx.options;
    let suppressed = (options.max_depth >= 1 && depth >= options.max_depth)
        || (!options.show_branches && depth == branch_level + 2)
        || (!options.show_tags && depth == tag_level + 2);

    if suppressed {
        if options.omission_markers && ctx.tree.node(parent).has_children() {
            writeln!(out, "{}", marker_line(ctx, depth, parent_path))?;
        }
        return Ok(());
    }

    for child in ctx.tree.children(parent) {
        let node = ctx.tree.node(child);
        let path = format!("{parent_path}/{}", node.name());
        writeln!(out, "{}", node_line(ctx, node, depth, &path))?;

        let (child_branch_level, child_tag_level) = match node.name() {
            "branches" => (depth, tag_level),
            "tags" => (branch_level, depth),
            _ => (branch_level, tag_level),
        };
        render_children(
            out,
            ctx,
            child,
            depth + 1,
            child_branch_level,
            child_tag_level,
            &path,
        )?;
    }
    Ok(())
}

fn node_line(
    ctx: &RenderContext<'_>,
    node: &crate::tree::TreeNode,
    depth: i32,
    path: &str,
) -> String {
    let text = if ctx.options.flatten {
        path.to_string()
    } else {
        format!("{}/{}", indent(depth), node.name())
    };
    if ctx.options.numbers {
        let w = ctx.revision_digits;
        format!(
            "({:0w$}; {:0w$})  {text}",
            node.added_on_revision(),
            node.last_seen_revision(ctx.latest_revision),
        )
    } else {
        text
    }
}

fn marker_line(ctx: &RenderContext<'_>, depth: i32, parent_path: &str) -> String {
    let text = if ctx.options.flatten {
        format!("{parent_path}/[..]")
    } else {
        format!("{}[..]", indent(depth))
    };
    if ctx.options.numbers {
        // Blank interval column keeps the path columns aligned.
        format!("{}{text}", " ".repeat(2 * ctx.revision_digits + 6))
    } else {
        text
    }
}

fn indent(depth: i32) -> String {
    " ".repeat(4 * depth.max(0) as usize)
}

/// Number of decimal digits in `n`; one for zero so column widths never
/// collapse on an empty repository.
pub fn digit_count(n: u64) -> usize {
    if n == 0 {
        1
    } else {
        (n.ilog10() + 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rendered(tree: &PathLifecycleTree, latest: u64, options: RenderOptions) -> String {
        let mut out = Vec::new();
        render_tree(&mut out, tree, latest, &options).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample_tree() -> PathLifecycleTree {
        let mut tree = PathLifecycleTree::new();
        tree.record_add("trunk", 1);
        tree.record_add("trunk/lib", 2);
        tree.record_add("branches/1.0/src", 3);
        tree.record_add("tags/rel-1", 4);
        tree.record_delete("trunk/lib", 5);
        tree
    }

    #[test]
    fn intervals_are_zero_padded_to_latest_revision_width() {
        let mut tree = PathLifecycleTree::new();
        tree.record_add("trunk", 1);
        tree.record_add("trunk/lib", 2);
        tree.record_delete("trunk/lib", 5);

        let out = rendered(&tree, 12, RenderOptions::default());
        assert_eq!(out, "(01; 12)  /trunk\n(02; 04)      /lib\n");
    }

    #[test]
    fn branch_content_is_suppressed_two_levels_below_branches() {
        let out = rendered(&sample_tree(), 5, RenderOptions::default());

        assert!(out.contains("/branches\n"));
        assert!(out.contains("/1.0\n"));
        assert!(out.contains("[..]\n"));
        assert!(!out.contains("/src"));
    }

    #[test]
    fn branch_toggle_reveals_branch_content() {
        let options = RenderOptions {
            show_branches: true,
            ..RenderOptions::default()
        };
        let out = rendered(&sample_tree(), 5, options);

        assert!(out.contains("/src\n"));
        assert!(!out.contains("[..]"));
    }

    #[test]
    fn suppressed_leaf_prints_no_marker() {
        // tags/rel-1 is childless, so nothing is printed below it even
        // though the suppression level is reached.
        let out = rendered(&sample_tree(), 5, RenderOptions::default());

        let marker_lines = out.lines().filter(|l| l.ends_with("[..]")).count();
        assert_eq!(marker_lines, 1);
        assert!(out.contains("/rel-1\n"));
    }

    #[test]
    fn markers_can_be_disabled() {
        let options = RenderOptions {
            omission_markers: false,
            ..RenderOptions::default()
        };
        let out = rendered(&sample_tree(), 5, options);
        assert!(!out.contains("[..]"));
    }

    #[test]
    fn nested_branches_folder_rearms_suppression() {
        let mut tree = PathLifecycleTree::new();
        tree.record_add("tags/1.0/branches/b/deep", 2);

        let options = RenderOptions {
            show_tags: true,
            ..RenderOptions::default()
        };
        let out = rendered(&tree, 2, options);

        assert!(out.contains("/branches\n"));
        assert!(out.contains("/b\n"));
        assert!(!out.contains("/deep"));
    }

    #[test]
    fn depth_limit_truncates_with_marker() {
        let mut tree = PathLifecycleTree::new();
        tree.record_add("trunk/lib/util", 1);

        let options = RenderOptions {
            max_depth: 2,
            ..RenderOptions::default()
        };
        let out = rendered(&tree, 1, options);

        assert!(out.contains("/trunk\n"));
        assert!(out.contains("/lib\n"));
        assert!(!out.contains("/util"));
        assert!(out.contains("[..]\n"));
    }

    #[test]
    fn unlimited_depth_prints_every_node_once_in_name_order() {
        let tree = sample_tree();
        let options = RenderOptions {
            numbers: false,
            show_branches: true,
            show_tags: true,
            flatten: true,
            ..RenderOptions::default()
        };
        let out = rendered(&tree, 5, options);

        let lines: Vec<&str> = out.lines().collect();
        let expected: Vec<String> = tree.walk().map(|(_, _, path)| path).collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn flattened_layout_prints_full_paths_without_indentation() {
        let mut tree = PathLifecycleTree::new();
        tree.record_add("trunk", 1);
        tree.record_add("trunk/lib", 2);

        let options = RenderOptions {
            flatten: true,
            ..RenderOptions::default()
        };
        let out = rendered(&tree, 2, options);
        assert_eq!(out, "(1; 2)  /trunk\n(2; 2)  /trunk/lib\n");
    }

    #[test]
    fn no_numbers_drops_the_interval_column() {
        let mut tree = PathLifecycleTree::new();
        tree.record_add("trunk", 1);

        let options = RenderOptions {
            numbers: false,
            ..RenderOptions::default()
        };
        assert_eq!(rendered(&tree, 1, options), "/trunk\n");
    }

    #[test]
    fn digit_count_handles_boundaries() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(1234), 4);
    }
}
