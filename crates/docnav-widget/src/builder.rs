//! Tree construction.
//!
//! [`TreeBuilder`] turns an ordered sequence of builder calls into both the
//! rendered tree (appended to a [`RenderSurface`]) and the [`NavTree`] model.
//! Ids are assigned densely in call order and the element handles returned
//! by the surface are kept in indexed tables for the [`NodeController`].

use crate::controller::{LeafSlot, NodeController, ParentSlot};
use crate::error::{Result, StructureError};
use crate::ids::{IdAllocator, LeafId, ParentId};
use crate::surface::{Action, Element, Link, RenderSurface};
use crate::theme::{IconSet, Theme};
use crate::tree::{LeafNode, NavTree, ParentNode};

/// Builder for the navigation tree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: NavTree,
    parent_ids: IdAllocator<ParentId>,
    leaf_ids: IdAllocator<LeafId>,
    /// Parents opened by `begin_parent` and not yet closed, innermost last.
    open: Vec<ParentId>,
    parent_slots: Vec<ParentSlot>,
    leaf_slots: Vec<LeafSlot>,
}

impl TreeBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new parent node.
    ///
    /// Renders the collapsed icon and the clickable label, then opens a
    /// hidden container that receives every node added until the matching
    /// [`end_parent`](Self::end_parent).
    pub fn begin_parent<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        theme: &Theme,
        label: &str,
    ) -> ParentId {
        let id = self.parent_ids.allocate();

        surface.append(Element::Group {
            class: &theme.classes.parent,
        });
        surface.append(Element::Group {
            class: &theme.classes.node,
        });
        let icon = surface.append(Element::Icon {
            src: &theme.icons.parent.off,
            action: Some(Action::ParentIcon(id)),
            link: None,
        });
        surface.append(Element::Label {
            text: label,
            class: &theme.classes.parent_label,
            action: Some(Action::ParentLabel(id)),
            link: None,
        });
        surface.close();
        let container = surface.append(Element::Container {
            visible: false,
            anchor: None,
        });

        self.tree.push_parent(
            ParentNode {
                id,
                label: label.to_owned(),
                expanded: false,
                children: Vec::new(),
            },
            self.open.last().copied(),
        );
        self.parent_slots.push(ParentSlot { icon, container });
        self.open.push(id);

        tracing::trace!(id = id.0, label, depth = self.open.len(), "Opened parent node");
        id
    }

    /// Close the innermost open parent node.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::NoOpenParent`] if no parent is open.
    pub fn end_parent<S: RenderSurface>(&mut self, surface: &mut S) -> Result<ParentId> {
        let id = self.open.pop().ok_or(StructureError::NoOpenParent)?;
        // Child container, then the parent's enclosing block.
        surface.close();
        surface.close();
        tracing::trace!(id = id.0, "Closed parent node");
        Ok(id)
    }

    /// Add a leaf node linking to `url` in the `target` browsing context.
    ///
    /// Icon and label both navigate and both select the leaf when clicked.
    pub fn add_leaf<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        theme: &Theme,
        label: &str,
        url: &str,
        target: &str,
    ) -> LeafId {
        let id = self.leaf_ids.allocate();
        let link = Link { href: url, target };

        surface.append(Element::Group {
            class: &theme.classes.node,
        });
        let icon = surface.append(Element::Icon {
            src: &theme.icons.leaf.off,
            action: Some(Action::LeafIcon(id)),
            link: Some(link),
        });
        surface.append(Element::Label {
            text: label,
            class: &theme.classes.leaf_label,
            action: Some(Action::LeafLabel(id)),
            link: Some(link),
        });
        surface.close();

        self.tree.push_leaf(
            LeafNode {
                id,
                label: label.to_owned(),
                url: url.to_owned(),
                target: target.to_owned(),
                selected: false,
            },
            self.open.last().copied(),
        );
        self.leaf_slots.push(LeafSlot { icon });

        tracing::trace!(id = id.0, label, url, "Added leaf node");
        id
    }

    /// Render the "Expand All" and "Collapse All" controls.
    pub fn add_expand_collapse_all_controls<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        theme: &Theme,
    ) {
        surface.append(Element::Group {
            class: &theme.classes.controls,
        });
        surface.append(Element::Label {
            text: "Expand All",
            class: &theme.classes.expand_collapse,
            action: Some(Action::ExpandAll),
            link: None,
        });
        surface.append(Element::Label {
            text: "Collapse All",
            class: &theme.classes.expand_collapse,
            action: Some(Action::CollapseAll),
            link: None,
        });
        surface.close();
    }

    /// Number of parents opened and not yet closed.
    #[must_use]
    pub fn open_depth(&self) -> usize {
        self.open.len()
    }

    /// Tree constructed so far.
    #[must_use]
    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    /// Finish construction and hand the tree over to a [`NodeController`].
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnclosedParents`] if any parent is still open.
    pub fn finish(self, icons: &IconSet) -> Result<NodeController> {
        if !self.open.is_empty() {
            return Err(StructureError::UnclosedParents(self.open.len()).into());
        }
        tracing::debug!(
            parents = self.parent_ids.count(),
            leaves = self.leaf_ids.count(),
            "Navigation tree built"
        );
        Ok(NodeController::new(
            self.tree,
            self.parent_slots,
            self.leaf_slots,
            icons,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WidgetError;
    use crate::html::HtmlSurface;
    use crate::tree::TreeNode;

    #[test]
    fn test_parent_ids_dense_in_construction_order() {
        let mut surface = HtmlSurface::new();
        let theme = Theme::default();
        let mut builder = TreeBuilder::new();

        let a = builder.begin_parent(&mut surface, &theme, "A");
        let b = builder.begin_parent(&mut surface, &theme, "B");
        builder.end_parent(&mut surface).unwrap();
        let c = builder.begin_parent(&mut surface, &theme, "C");
        builder.end_parent(&mut surface).unwrap();
        builder.end_parent(&mut surface).unwrap();
        let d = builder.begin_parent(&mut surface, &theme, "D");
        builder.end_parent(&mut surface).unwrap();

        assert_eq!(vec![a, b, c, d], (0..4).map(ParentId).collect::<Vec<_>>());
    }

    #[test]
    fn test_leaf_ids_independent_of_parent_ids() {
        let mut surface = HtmlSurface::new();
        let theme = Theme::default();
        let mut builder = TreeBuilder::new();

        builder.begin_parent(&mut surface, &theme, "A");
        builder.begin_parent(&mut surface, &theme, "B");
        let first = builder.add_leaf(&mut surface, &theme, "one", "one.html", "main");
        builder.end_parent(&mut surface).unwrap();
        let second = builder.add_leaf(&mut surface, &theme, "two", "two.html", "main");
        builder.end_parent(&mut surface).unwrap();

        assert_eq!(first, LeafId(0));
        assert_eq!(second, LeafId(1));
    }

    #[test]
    fn test_nesting_follows_open_parents() {
        let mut surface = HtmlSurface::new();
        let theme = Theme::default();
        let mut builder = TreeBuilder::new();

        let guides = builder.begin_parent(&mut surface, &theme, "Guides");
        let intro = builder.add_leaf(&mut surface, &theme, "Intro", "intro.html", "main");
        builder.end_parent(&mut surface).unwrap();
        let about = builder.add_leaf(&mut surface, &theme, "About", "about.html", "main");

        let tree = builder.tree();
        assert_eq!(
            tree.roots(),
            &[TreeNode::Parent(guides), TreeNode::Leaf(about)]
        );
        assert_eq!(tree.parent(guides).unwrap().children, vec![TreeNode::Leaf(intro)]);
        let leaf = tree.leaf(intro).unwrap();
        assert_eq!(leaf.url, "intro.html");
        assert_eq!(leaf.target, "main");
        assert!(!leaf.selected);
    }

    #[test]
    fn test_end_parent_without_open_parent() {
        let mut surface = HtmlSurface::new();
        let mut builder = TreeBuilder::new();

        let err = builder.end_parent(&mut surface).unwrap_err();
        assert_eq!(err, WidgetError::Structure(StructureError::NoOpenParent));
    }

    #[test]
    fn test_finish_with_open_parent() {
        let mut surface = HtmlSurface::new();
        let theme = Theme::default();
        let mut builder = TreeBuilder::new();
        builder.begin_parent(&mut surface, &theme, "A");
        builder.begin_parent(&mut surface, &theme, "B");
        builder.end_parent(&mut surface).unwrap();

        let err = builder.finish(&theme.icons).unwrap_err();
        assert_eq!(err, WidgetError::Structure(StructureError::UnclosedParents(1)));
    }

    #[test]
    fn test_initial_rendering_is_collapsed() {
        let mut surface = HtmlSurface::new();
        let theme = Theme::default();
        let mut builder = TreeBuilder::new();
        builder.begin_parent(&mut surface, &theme, "Guides");
        builder.add_leaf(&mut surface, &theme, "Intro", "intro.html", "main");
        builder.end_parent(&mut surface).unwrap();

        let html = surface.render();
        assert!(html.contains(r#"<img src="../images/plus.png" data-action="parent-icon:0">"#));
        assert!(html.contains(r#"<div style="display:none">"#));
        assert!(html.contains(r#"<img src="../images/page.png" data-action="leaf-icon:0">"#));
    }
}
