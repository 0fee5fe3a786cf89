//! Hierarchical key/value tree.
//!
//! [`ConfigTree`] is the common currency between the schema (default and
//! required trees), the file loaders, and the resolved configuration. Every
//! value is kept as its raw string; decoding happens at read time.

/// A node of a configuration tree.
///
/// A node is either a leaf carrying a raw string payload or a branch carrying
/// named children. Children keep their insertion order, which is what the
/// reporter and the required-key walk follow.
///
/// # Examples
///
/// ```
/// use optgroup_core::ConfigTree;
///
/// let mut tree = ConfigTree::new();
/// tree.put("sigma", "0.5");
/// tree.put("gpmodel.scale", "50");
///
/// assert_eq!(tree.get_value("sigma"), Some("0.5"));
/// assert_eq!(tree.get_value("gpmodel.scale"), Some("50"));
/// assert!(tree.get("gpmodel").is_some_and(|node| !node.is_leaf()));
/// assert!(!tree.contains("level"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigTree {
    /// Raw string payload.
    Leaf(String),
    /// Ordered named children.
    Branch(Vec<(String, ConfigTree)>),
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    /// Creates an empty branch.
    pub fn new() -> Self {
        Self::Branch(Vec::new())
    }

    /// Creates a leaf.
    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf(value.into())
    }

    /// Returns `true` for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns `true` if the node has no children. Leaves are always empty.
    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children().len()
    }

    /// Leaf payload, `None` for branches.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Branch(_) => None,
        }
    }

    /// Direct children in insertion order. Leaves have none.
    pub fn children(&self) -> &[(String, ConfigTree)] {
        match self {
            Self::Leaf(_) => &[],
            Self::Branch(children) => children,
        }
    }

    /// Looks up a direct child by its exact name (dots are not interpreted).
    pub fn child(&self, name: &str) -> Option<&ConfigTree> {
        self.children()
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    /// Looks up a node by dotted path. The empty path is the node itself.
    pub fn get(&self, path: &str) -> Option<&ConfigTree> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.')
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Leaf payload at a dotted path.
    pub fn get_value(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(ConfigTree::value)
    }

    /// Returns `true` if a leaf or branch exists at the dotted path.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Sets a direct child, replacing an existing child of the same name in
    /// place. A leaf receiving a child becomes a branch.
    pub fn insert(&mut self, name: impl Into<String>, node: ConfigTree) {
        let name = name.into();
        match self {
            Self::Leaf(_) => *self = Self::Branch(vec![(name, node)]),
            Self::Branch(children) => match children.iter_mut().find(|(key, _)| *key == name) {
                Some((_, existing)) => *existing = node,
                None => children.push((name, node)),
            },
        }
    }

    /// Writes a leaf at a dotted path, creating intermediate branches.
    ///
    /// Whatever was at the path before (leaf or whole branch) is replaced.
    /// Intermediate leaves on the way are turned into branches; callers that
    /// must not lose data check the shape first (see
    /// [`merge_trees`](crate::merge_trees)).
    pub fn put(&mut self, path: &str, value: impl Into<String>) {
        let Some((head, rest)) = path.split_once('.') else {
            self.insert(path, ConfigTree::Leaf(value.into()));
            return;
        };
        match self.child_mut(head) {
            Some(child) => child.put(rest, value),
            None => {
                let mut child = ConfigTree::new();
                child.put(rest, value);
                self.insert(head, child);
            }
        }
    }

    /// All leaves with their full dotted paths, depth-first in insertion
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use optgroup_core::ConfigTree;
    ///
    /// let mut tree = ConfigTree::new();
    /// tree.put("input", "a.img");
    /// tree.put("gpmodel.scale", "50");
    /// let leaves = tree.leaves();
    /// assert_eq!(leaves, vec![
    ///     ("input".to_string(), "a.img"),
    ///     ("gpmodel.scale".to_string(), "50"),
    /// ]);
    /// ```
    pub fn leaves(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        collect_leaves(self, "", &mut out);
        out
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut ConfigTree> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(children) => children
                .iter_mut()
                .find(|(key, _)| key == name)
                .map(|(_, node)| node),
        }
    }
}

fn collect_leaves<'a>(node: &'a ConfigTree, prefix: &str, out: &mut Vec<(String, &'a str)>) {
    for (name, child) in node.children() {
        let path = join_path(prefix, name);
        match child {
            ConfigTree::Leaf(value) => out.push((path, value)),
            ConfigTree::Branch(_) => collect_leaves(child, &path, out),
        }
    }
}

/// Returns `true` if `path` is a non-empty dotted path without empty
/// segments (`a.b`, not `.a`, `a..b` or `a.`).
///
/// ```
/// use optgroup_core::is_valid_path;
///
/// assert!(is_valid_path("gpmodel.scale"));
/// assert!(!is_valid_path(".scale"));
/// assert!(!is_valid_path(""));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    !path.split('.').any(str::is_empty)
}

/// Joins a dotted prefix and a key; an empty prefix yields the key.
pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
