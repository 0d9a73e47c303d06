//! Navigation tree model.
//!
//! Nodes live in two flat arenas indexed by their ids, with parent/children
//! relationships tracked by ids. This gives O(1) lookups for the event
//! handlers and O(d) visibility checks where d is the node depth.

use crate::ids::{LeafId, ParentId};

/// Reference to a node of either kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TreeNode {
    Parent(ParentId),
    Leaf(LeafId),
}

/// Expandable node owning an ordered list of children.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParentNode {
    pub id: ParentId,
    pub label: String,
    /// Whether the children are shown.
    pub expanded: bool,
    /// Children in construction order.
    pub children: Vec<TreeNode>,
}

/// Navigable node linking to a document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LeafNode {
    pub id: LeafId,
    pub label: String,
    pub url: String,
    /// Browsing context the URL opens in.
    pub target: String,
    /// Whether this leaf is the current selection.
    pub selected: bool,
}

/// Navigation tree with id-indexed lookups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NavTree {
    parents: Vec<ParentNode>,
    leaves: Vec<LeafNode>,
    /// Enclosing parent of each parent node.
    #[cfg_attr(feature = "serde", serde(skip))]
    parent_of_parent: Vec<Option<ParentId>>,
    /// Enclosing parent of each leaf node.
    #[cfg_attr(feature = "serde", serde(skip))]
    parent_of_leaf: Vec<Option<ParentId>>,
    roots: Vec<TreeNode>,
}

impl NavTree {
    /// Get a parent node by id.
    #[must_use]
    pub fn parent(&self, id: ParentId) -> Option<&ParentNode> {
        self.parents.get(id.0)
    }

    /// Get a leaf node by id.
    #[must_use]
    pub fn leaf(&self, id: LeafId) -> Option<&LeafNode> {
        self.leaves.get(id.0)
    }

    /// All parent nodes in id order.
    #[must_use]
    pub fn parents(&self) -> &[ParentNode] {
        &self.parents
    }

    /// All leaf nodes in id order.
    #[must_use]
    pub fn leaves(&self) -> &[LeafNode] {
        &self.leaves
    }

    /// Top-level nodes in construction order.
    #[must_use]
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Parent node enclosing `node`, `None` for top-level nodes.
    #[must_use]
    pub fn enclosing_parent(&self, node: TreeNode) -> Option<ParentId> {
        match node {
            TreeNode::Parent(id) => self.parent_of_parent.get(id.0).copied().flatten(),
            TreeNode::Leaf(id) => self.parent_of_leaf.get(id.0).copied().flatten(),
        }
    }

    /// Whether `node` is reachable, i.e. every enclosing parent is expanded.
    ///
    /// Unknown nodes are never visible.
    #[must_use]
    pub fn is_visible(&self, node: TreeNode) -> bool {
        if !self.contains(node) {
            return false;
        }
        let mut current = self.enclosing_parent(node);
        while let Some(id) = current {
            if !self.parents[id.0].expanded {
                return false;
            }
            current = self.parent_of_parent[id.0];
        }
        true
    }

    /// The selected leaf, if any.
    #[must_use]
    pub fn selected_leaf(&self) -> Option<LeafId> {
        self.leaves.iter().find(|leaf| leaf.selected).map(|leaf| leaf.id)
    }

    fn contains(&self, node: TreeNode) -> bool {
        match node {
            TreeNode::Parent(id) => id.0 < self.parents.len(),
            TreeNode::Leaf(id) => id.0 < self.leaves.len(),
        }
    }

    pub(crate) fn parent_mut(&mut self, id: ParentId) -> Option<&mut ParentNode> {
        self.parents.get_mut(id.0)
    }

    pub(crate) fn leaf_mut(&mut self, id: LeafId) -> Option<&mut LeafNode> {
        self.leaves.get_mut(id.0)
    }

    /// Register a new parent under `enclosing` (or at top level).
    ///
    /// Ids must arrive densely in order; the builder's allocator guarantees it.
    pub(crate) fn push_parent(&mut self, node: ParentNode, enclosing: Option<ParentId>) {
        debug_assert_eq!(node.id.0, self.parents.len());
        let id = node.id;
        self.parents.push(node);
        self.parent_of_parent.push(enclosing);
        self.attach(TreeNode::Parent(id), enclosing);
    }

    /// Register a new leaf under `enclosing` (or at top level).
    pub(crate) fn push_leaf(&mut self, node: LeafNode, enclosing: Option<ParentId>) {
        debug_assert_eq!(node.id.0, self.leaves.len());
        let id = node.id;
        self.leaves.push(node);
        self.parent_of_leaf.push(enclosing);
        self.attach(TreeNode::Leaf(id), enclosing);
    }

    fn attach(&mut self, node: TreeNode, enclosing: Option<ParentId>) {
        match enclosing {
            Some(parent) => self.parents[parent.0].children.push(node),
            None => self.roots.push(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(id: usize, label: &str) -> ParentNode {
        ParentNode {
            id: ParentId(id),
            label: label.to_owned(),
            expanded: false,
            children: Vec::new(),
        }
    }

    fn leaf(id: usize, label: &str) -> LeafNode {
        LeafNode {
            id: LeafId(id),
            label: label.to_owned(),
            url: format!("{label}.html"),
            target: "main".to_owned(),
            selected: false,
        }
    }

    /// Guides(0) { Intro(0), Advanced(1) { Tuning(1) } }, About(2)
    fn sample_tree() -> NavTree {
        let mut tree = NavTree::default();
        tree.push_parent(parent(0, "Guides"), None);
        tree.push_leaf(leaf(0, "intro"), Some(ParentId(0)));
        tree.push_parent(parent(1, "Advanced"), Some(ParentId(0)));
        tree.push_leaf(leaf(1, "tuning"), Some(ParentId(1)));
        tree.push_leaf(leaf(2, "about"), None);
        tree
    }

    #[test]
    fn test_structure() {
        let tree = sample_tree();
        assert_eq!(
            tree.roots(),
            &[TreeNode::Parent(ParentId(0)), TreeNode::Leaf(LeafId(2))]
        );
        assert_eq!(
            tree.parent(ParentId(0)).unwrap().children,
            vec![TreeNode::Leaf(LeafId(0)), TreeNode::Parent(ParentId(1))]
        );
        assert_eq!(
            tree.enclosing_parent(TreeNode::Leaf(LeafId(1))),
            Some(ParentId(1))
        );
        assert_eq!(tree.enclosing_parent(TreeNode::Leaf(LeafId(2))), None);
    }

    #[test]
    fn test_visibility_requires_all_ancestors_expanded() {
        let mut tree = sample_tree();
        let tuning = TreeNode::Leaf(LeafId(1));
        assert!(!tree.is_visible(tuning));

        tree.parent_mut(ParentId(1)).unwrap().expanded = true;
        assert!(!tree.is_visible(tuning));

        tree.parent_mut(ParentId(0)).unwrap().expanded = true;
        assert!(tree.is_visible(tuning));
    }

    #[test]
    fn test_top_level_always_visible() {
        let tree = sample_tree();
        assert!(tree.is_visible(TreeNode::Parent(ParentId(0))));
        assert!(tree.is_visible(TreeNode::Leaf(LeafId(2))));
    }

    #[test]
    fn test_unknown_node_not_visible() {
        let tree = sample_tree();
        assert!(!tree.is_visible(TreeNode::Leaf(LeafId(9))));
        assert!(tree.parent(ParentId(5)).is_none());
    }

    #[test]
    fn test_selected_leaf() {
        let mut tree = sample_tree();
        assert_eq!(tree.selected_leaf(), None);
        tree.leaf_mut(LeafId(1)).unwrap().selected = true;
        assert_eq!(tree.selected_leaf(), Some(LeafId(1)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_tree() {
        let json = serde_json::to_value(sample_tree()).unwrap();
        assert_eq!(json["parents"][0]["label"], "Guides");
        assert_eq!(json["parents"][0]["expanded"], false);
        assert_eq!(json["parents"][0]["children"][0], serde_json::json!({ "Leaf": 0 }));
        assert_eq!(json["leaves"][1]["url"], "tuning.html");
        assert!(json.get("parent_of_leaf").is_none());
    }
}
