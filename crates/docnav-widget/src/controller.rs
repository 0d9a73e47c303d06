//! Runtime state of the navigation tree.
//!
//! [`NodeController`] translates clicks on rendered nodes into state changes
//! and keeps the surface in step: parent nodes flip between collapsed and
//! expanded, leaf nodes share a single selection.

use crate::error::{LookupError, Result};
use crate::ids::{LeafId, ParentId};
use crate::surface::{ElementId, RenderSurface};
use crate::theme::{IconPair, IconSet};
use crate::tree::{NavTree, TreeNode};

/// Surface elements governed by a parent node.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ParentSlot {
    pub(crate) icon: ElementId,
    pub(crate) container: ElementId,
}

/// Surface elements governed by a leaf node.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LeafSlot {
    pub(crate) icon: ElementId,
}

/// Event handlers and state for a finished navigation tree.
#[derive(Debug)]
pub struct NodeController {
    tree: NavTree,
    parent_slots: Vec<ParentSlot>,
    leaf_slots: Vec<LeafSlot>,
    parent_icons: IconPair,
    leaf_icons: IconPair,
    selected: Option<LeafId>,
}

impl NodeController {
    pub(crate) fn new(
        tree: NavTree,
        parent_slots: Vec<ParentSlot>,
        leaf_slots: Vec<LeafSlot>,
        icons: &IconSet,
    ) -> Self {
        Self {
            tree,
            parent_slots,
            leaf_slots,
            parent_icons: icons.parent.clone(),
            leaf_icons: icons.leaf.clone(),
            selected: None,
        }
    }

    /// The navigation tree with its current state.
    #[must_use]
    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    /// Parent icon clicked: toggle the parent.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `id` is unknown.
    pub fn on_parent_icon_clicked<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        id: ParentId,
    ) -> Result<bool> {
        self.toggle_parent(surface, id)
    }

    /// Parent label clicked: same effect as clicking the icon.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `id` is unknown.
    pub fn on_parent_label_clicked<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        id: ParentId,
    ) -> Result<bool> {
        self.toggle_parent(surface, id)
    }

    /// Leaf label clicked: select the leaf.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `id` is unknown.
    pub fn on_leaf_label_clicked<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        id: LeafId,
    ) -> Result<()> {
        self.select_leaf(surface, id)
    }

    /// Leaf icon clicked: select the leaf.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `id` is unknown.
    pub fn on_leaf_icon_clicked<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        id: LeafId,
    ) -> Result<()> {
        self.select_leaf(surface, id)
    }

    /// Flip a parent between collapsed and expanded.
    ///
    /// Returns the new `expanded` value.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `id` is unknown.
    pub fn toggle_parent<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        id: ParentId,
    ) -> Result<bool> {
        let expanded = !self.is_expanded(id)?;
        self.set_expanded(surface, id, expanded)?;
        tracing::debug!(id = id.0, expanded, "Toggled parent node");
        Ok(expanded)
    }

    /// Make `id` the selected leaf, deselecting the previous one.
    ///
    /// Selection is visual bookkeeping only; navigation is handled by the
    /// rendered link itself.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `id` is unknown.
    pub fn select_leaf<S: RenderSurface>(&mut self, surface: &mut S, id: LeafId) -> Result<()> {
        let slot = *self.leaf_slot(id)?;
        let previous = match self.selected {
            Some(previous) => Some((previous, *self.leaf_slot(previous)?)),
            None => None,
        };

        if let Some((_, previous_slot)) = previous {
            surface.set_icon(previous_slot.icon, &self.leaf_icons.off)?;
        }
        if let Err(err) = surface.set_icon(slot.icon, &self.leaf_icons.on) {
            if let Some((_, previous_slot)) = previous
                && let Err(restore) = surface.set_icon(previous_slot.icon, &self.leaf_icons.on)
            {
                tracing::warn!(%restore, "Failed to restore leaf icon");
            }
            return Err(err);
        }

        if let Some((previous, _)) = previous
            && let Some(leaf) = self.tree.leaf_mut(previous)
        {
            leaf.selected = false;
        }
        if let Some(leaf) = self.tree.leaf_mut(id) {
            leaf.selected = true;
        }
        self.selected = Some(id);

        tracing::debug!(id = id.0, "Selected leaf node");
        Ok(())
    }

    /// Expand every parent node, in id order.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if the surface lost track of an element.
    pub fn expand_all<S: RenderSurface>(&mut self, surface: &mut S) -> Result<()> {
        self.set_all(surface, true)
    }

    /// Collapse every parent node, in id order.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if the surface lost track of an element.
    pub fn collapse_all<S: RenderSurface>(&mut self, surface: &mut S) -> Result<()> {
        self.set_all(surface, false)
    }

    /// Whether parent `id` is expanded.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `id` is unknown.
    pub fn is_expanded(&self, id: ParentId) -> Result<bool> {
        self.tree
            .parent(id)
            .map(|parent| parent.expanded)
            .ok_or_else(|| LookupError::Parent(id).into())
    }

    /// Whether leaf `id` is selected.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `id` is unknown.
    pub fn is_selected(&self, id: LeafId) -> Result<bool> {
        self.tree
            .leaf(id)
            .map(|leaf| leaf.selected)
            .ok_or_else(|| LookupError::Leaf(id).into())
    }

    /// The currently selected leaf.
    #[must_use]
    pub fn selected_leaf(&self) -> Option<LeafId> {
        self.selected
    }

    /// Whether `node` is reachable through expanded parents.
    #[must_use]
    pub fn is_visible(&self, node: TreeNode) -> bool {
        self.tree.is_visible(node)
    }

    fn set_all<S: RenderSurface>(&mut self, surface: &mut S, expanded: bool) -> Result<()> {
        let count = self.parent_slots.len();
        for index in 0..count {
            self.set_expanded(surface, ParentId(index), expanded)?;
        }
        tracing::debug!(count, expanded, "Set all parent nodes");
        Ok(())
    }

    fn set_expanded<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        id: ParentId,
        expanded: bool,
    ) -> Result<()> {
        let slot = *self
            .parent_slots
            .get(id.0)
            .ok_or(LookupError::Parent(id))?;
        let parent = self.tree.parent_mut(id).ok_or(LookupError::Parent(id))?;

        surface.set_visible(slot.container, expanded)?;
        if let Err(err) = surface.set_icon(slot.icon, self.parent_icons.for_state(expanded)) {
            if let Err(restore) = surface.set_visible(slot.container, parent.expanded) {
                tracing::warn!(%restore, "Failed to restore parent container");
            }
            return Err(err);
        }
        parent.expanded = expanded;
        Ok(())
    }

    fn leaf_slot(&self, id: LeafId) -> Result<&LeafSlot> {
        self.leaf_slots
            .get(id.0)
            .ok_or_else(|| LookupError::Leaf(id).into())
    }
}
