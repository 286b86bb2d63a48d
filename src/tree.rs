use std::collections::BTreeMap;

/// Stable handle into the tree's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
pub struct TreeNode {
    name: String,
    added_on_revision: u64,
    last_deleted_on_revision: Option<u64>,
    children: BTreeMap<String, NodeId>,
}

impl TreeNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Revision on which this path was first observed as added. Retained
    /// across delete/recreate cycles.
    pub fn added_on_revision(&self) -> u64 {
        self.added_on_revision
    }

    pub fn last_deleted_on_revision(&self) -> Option<u64> {
        self.last_deleted_on_revision
    }

    pub fn is_deleted(&self) -> bool {
        self.last_deleted_on_revision.is_some()
    }

    /// Last revision on which the path was present: the revision before its
    /// deletion, or the repository's latest revision if it was never deleted.
    pub fn last_seen_revision(&self, latest_revision: u64) -> u64 {
        match self.last_deleted_on_revision {
            Some(deleted_on) => deleted_on - 1,
            None => latest_revision,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Hierarchy of every directory path ever observed in the repository,
/// annotated with the revision interval during which each path existed.
///
/// Nodes are never removed: deleting a path only marks it (and its still
/// present descendants) with the deletion revision, preserving history.
/// Nodes live in an arena addressed by [`NodeId`]; index 0 is a synthetic
/// root with an empty name that is never rendered.
#[derive(Debug)]
pub struct PathLifecycleTree {
    nodes: Vec<TreeNode>,
}

pub const ROOT: NodeId = NodeId(0);

impl PathLifecycleTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode {
                name: String::new(),
                added_on_revision: 0,
                last_deleted_on_revision: None,
                children: BTreeMap::new(),
            }],
        }
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT.0].children.is_empty()
    }

    /// Children of `id` in lexicographic order by name.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0].children.values().copied()
    }

    /// Record that `path` was added on `revision`.
    ///
    /// Missing ancestors are created implicitly with `revision` as their own
    /// first-appearance revision. Re-adding a deleted path clears its
    /// deletion marker but keeps the original `added_on_revision`. Adding a
    /// path that is already present is a no-op.
    pub fn record_add(&mut self, path: &str, revision: u64) {
        let mut current = ROOT;
        for segment in segments(path) {
            current = match self.nodes[current.0].children.get(segment) {
                Some(&child) => child,
                None => {
                    let child = NodeId(self.nodes.len());
                    self.nodes.push(TreeNode {
                        name: segment.to_string(),
                        added_on_revision: revision,
                        last_deleted_on_revision: None,
                        children: BTreeMap::new(),
                    });
                    self.nodes[current.0]
                        .children
                        .insert(segment.to_string(), child);
                    child
                }
            };
        }
        if current != ROOT {
            self.nodes[current.0].last_deleted_on_revision = None;
        }
    }

    /// Record that `path` was deleted on `revision`, marking every still
    /// present descendant with the same revision. Descendants deleted on an
    /// earlier revision keep their own deletion revision. A path that does
    /// not resolve is a no-op: the backend contract guarantees deletions are
    /// only reported for previously added paths, and a violation degrades to
    /// a best-effort report instead of a crash.
    pub fn record_delete(&mut self, path: &str, revision: u64) {
        let Some(target) = self.resolve(path) else {
            return;
        };
        if target == ROOT {
            return;
        }
        let mut stack = vec![target];
        while let Some(id) = stack.pop() {
            if self.nodes[id.0].last_deleted_on_revision.is_some() {
                continue;
            }
            self.nodes[id.0].last_deleted_on_revision = Some(revision);
            stack.extend(self.nodes[id.0].children.values().copied());
        }
    }

    fn resolve(&self, path: &str) -> Option<NodeId> {
        let mut current = ROOT;
        for segment in segments(path) {
            current = *self.nodes[current.0].children.get(segment)?;
        }
        Some(current)
    }

    /// Lazy depth-first traversal in name order, yielding each node with its
    /// depth (top-level paths at depth 0) and full path from the root. The
    /// synthetic root is excluded. Re-walking is cheap and side-effect free.
    pub fn walk(&self) -> Walk<'_> {
        let mut stack: Vec<(NodeId, usize, String)> = self
            .children(ROOT)
            .map(|id| (id, 0, format!("/{}", self.node(id).name())))
            .collect();
        stack.reverse();
        Walk { tree: self, stack }
    }
}

impl Default for PathLifecycleTree {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Walk<'a> {
    tree: &'a PathLifecycleTree,
    stack: Vec<(NodeId, usize, String)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (NodeId, usize, String);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth, path) = self.stack.pop()?;
        let children: Vec<_> = self
            .tree
            .children(id)
            .map(|c| (c, depth + 1, format!("{path}/{}", self.tree.node(c).name())))
            .collect();
        self.stack.extend(children.into_iter().rev());
        Some((id, depth, path))
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
