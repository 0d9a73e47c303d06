//! One widget instance on one page.
//!
//! [`NavPage`] owns the rendering surface and every piece of widget state:
//! the tree builder (until the tree is finished), the node controller, the
//! section controller and the clipboard used by copy buttons. Id allocators
//! live inside it, so independent pages never share counters.
//!
//! # Example
//!
//! ```
//! use docnav_widget::{Action, HtmlSurface, NavPage, ParentId};
//!
//! let mut page = NavPage::new(HtmlSurface::new());
//! page.begin_parent("Guides")?;
//! page.add_leaf("Intro", "intro.html", "main")?;
//! page.end_parent()?;
//! page.add_expand_collapse_all_controls()?;
//! page.finish_tree()?;
//!
//! page.dispatch(&"parent-icon:0".parse::<Action>()?)?;
//! assert!(page.nodes()?.is_expanded(ParentId(0))?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::builder::TreeBuilder;
use crate::controller::NodeController;
use crate::copy_code::{self, Clipboard, CopyButton, MemoryClipboard};
use crate::error::{Result, StructureError};
use crate::ids::{LeafId, ParentId};
use crate::section::SectionController;
use crate::surface::{Action, ElementId, RenderSurface, TextSource};
use crate::theme::Theme;

/// Kind of an open scope on the shared surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Parent,
    Section,
}

impl Scope {
    fn name(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Section => "section",
        }
    }
}

/// Navigation widget bound to a rendering surface.
pub struct NavPage<S: RenderSurface> {
    surface: S,
    theme: Theme,
    builder: Option<TreeBuilder>,
    nodes: Option<NodeController>,
    sections: SectionController,
    clipboard: Box<dyn Clipboard>,
    /// Parents and sections open on the surface, innermost last.
    scopes: Vec<Scope>,
}

impl<S: RenderSurface> NavPage<S> {
    /// Create a page with the default theme.
    pub fn new(surface: S) -> Self {
        Self::with_theme(surface, Theme::default())
    }

    /// Create a page with custom icons and classes.
    pub fn with_theme(surface: S, theme: Theme) -> Self {
        let sections = SectionController::new(theme.icons.section.clone());
        Self {
            surface,
            theme,
            builder: Some(TreeBuilder::new()),
            nodes: None,
            sections,
            clipboard: Box::new(MemoryClipboard::new()),
            scopes: Vec::new(),
        }
    }

    /// Use `clipboard` for copy-code buttons.
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// The rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consume the page and return its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Icons and classes in use.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Node controller of the finished tree.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::NotFinished`] before [`finish_tree`](Self::finish_tree).
    pub fn nodes(&self) -> Result<&NodeController> {
        self.nodes
            .as_ref()
            .ok_or_else(|| StructureError::NotFinished.into())
    }

    /// Section controller.
    pub fn sections(&self) -> &SectionController {
        &self.sections
    }

    // Tree construction

    /// Open a parent node. See [`TreeBuilder::begin_parent`].
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::AlreadyFinished`] after the tree is finished.
    pub fn begin_parent(&mut self, label: &str) -> Result<ParentId> {
        let builder = self.builder.as_mut().ok_or(StructureError::AlreadyFinished)?;
        let id = builder.begin_parent(&mut self.surface, &self.theme, label);
        self.scopes.push(Scope::Parent);
        Ok(id)
    }

    /// Close the innermost parent node. See [`TreeBuilder::end_parent`].
    ///
    /// # Errors
    ///
    /// Returns a structural error without an open parent, while a section
    /// opened inside the parent is still open, or after the tree is finished.
    pub fn end_parent(&mut self) -> Result<ParentId> {
        let builder = self.builder.as_mut().ok_or(StructureError::AlreadyFinished)?;
        if builder.open_depth() > 0 {
            check_innermost(&self.scopes, Scope::Parent)?;
        }
        let id = builder.end_parent(&mut self.surface)?;
        self.scopes.pop();
        Ok(id)
    }

    /// Add a leaf node. See [`TreeBuilder::add_leaf`].
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::AlreadyFinished`] after the tree is finished.
    pub fn add_leaf(&mut self, label: &str, url: &str, target: &str) -> Result<LeafId> {
        let builder = self.builder.as_mut().ok_or(StructureError::AlreadyFinished)?;
        Ok(builder.add_leaf(&mut self.surface, &self.theme, label, url, target))
    }

    /// Render the "Expand All" / "Collapse All" controls.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::AlreadyFinished`] after the tree is finished.
    pub fn add_expand_collapse_all_controls(&mut self) -> Result<()> {
        let builder = self.builder.as_mut().ok_or(StructureError::AlreadyFinished)?;
        builder.add_expand_collapse_all_controls(&mut self.surface, &self.theme);
        Ok(())
    }

    /// Finish tree construction and enable the node event handlers.
    ///
    /// # Errors
    ///
    /// Returns a structural error if parents are still open or the tree is
    /// already finished. The builder stays usable after an unclosed-parent
    /// error.
    pub fn finish_tree(&mut self) -> Result<()> {
        let depth = self
            .builder
            .as_ref()
            .ok_or(StructureError::AlreadyFinished)?
            .open_depth();
        if depth > 0 {
            return Err(StructureError::UnclosedParents(depth).into());
        }
        let builder = self.builder.take().ok_or(StructureError::AlreadyFinished)?;
        self.nodes = Some(builder.finish(&self.theme.icons)?);
        Ok(())
    }

    // Sections

    /// Render a section heading and open its content container.
    ///
    /// # Errors
    ///
    /// Returns a structural error if `name` is empty or taken.
    pub fn begin_section(
        &mut self,
        level: u8,
        class: &str,
        title: &str,
        name: &str,
    ) -> Result<()> {
        self.sections
            .begin_section(&mut self.surface, &self.theme, level, class, title, name)?;
        self.scopes.push(Scope::Section);
        Ok(())
    }

    /// Close the innermost section's content container.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::NoOpenSection`] if no section is open and
    /// [`StructureError::Misnested`] while a parent opened inside the
    /// section is still open.
    pub fn end_section(&mut self) -> Result<()> {
        if self.sections.open_depth() > 0 {
            check_innermost(&self.scopes, Scope::Section)?;
        }
        self.sections.end_section(&mut self.surface)?;
        self.scopes.pop();
        Ok(())
    }

    /// Toggle the section named `name`.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure for an unknown name.
    pub fn toggle_section(&mut self, name: &str) -> Result<bool> {
        self.sections.toggle(&mut self.surface, name)
    }

    /// Expand the section named `name` if it is collapsed.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure for an unknown name.
    pub fn open_section(&mut self, name: &str) -> Result<()> {
        self.sections.open(&mut self.surface, name)
    }

    // Node events

    /// See [`NodeController::on_parent_icon_clicked`].
    ///
    /// # Errors
    ///
    /// Returns a structural error before the tree is finished and a lookup
    /// failure for an unknown id.
    pub fn on_parent_icon_clicked(&mut self, id: ParentId) -> Result<bool> {
        let nodes = self.nodes.as_mut().ok_or(StructureError::NotFinished)?;
        nodes.on_parent_icon_clicked(&mut self.surface, id)
    }

    /// See [`NodeController::on_parent_label_clicked`].
    ///
    /// # Errors
    ///
    /// Returns a structural error before the tree is finished and a lookup
    /// failure for an unknown id.
    pub fn on_parent_label_clicked(&mut self, id: ParentId) -> Result<bool> {
        let nodes = self.nodes.as_mut().ok_or(StructureError::NotFinished)?;
        nodes.on_parent_label_clicked(&mut self.surface, id)
    }

    /// See [`NodeController::on_leaf_label_clicked`].
    ///
    /// # Errors
    ///
    /// Returns a structural error before the tree is finished and a lookup
    /// failure for an unknown id.
    pub fn on_leaf_label_clicked(&mut self, id: LeafId) -> Result<()> {
        let nodes = self.nodes.as_mut().ok_or(StructureError::NotFinished)?;
        nodes.on_leaf_label_clicked(&mut self.surface, id)
    }

    /// See [`NodeController::on_leaf_icon_clicked`].
    ///
    /// # Errors
    ///
    /// Returns a structural error before the tree is finished and a lookup
    /// failure for an unknown id.
    pub fn on_leaf_icon_clicked(&mut self, id: LeafId) -> Result<()> {
        let nodes = self.nodes.as_mut().ok_or(StructureError::NotFinished)?;
        nodes.on_leaf_icon_clicked(&mut self.surface, id)
    }

    /// Expand every parent node.
    ///
    /// # Errors
    ///
    /// Returns a structural error before the tree is finished.
    pub fn expand_all(&mut self) -> Result<()> {
        let nodes = self.nodes.as_mut().ok_or(StructureError::NotFinished)?;
        nodes.expand_all(&mut self.surface)
    }

    /// Collapse every parent node.
    ///
    /// # Errors
    ///
    /// Returns a structural error before the tree is finished.
    pub fn collapse_all(&mut self) -> Result<()> {
        let nodes = self.nodes.as_mut().ok_or(StructureError::NotFinished)?;
        nodes.collapse_all(&mut self.surface)
    }

    /// Route an element's action to the matching handler.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error.
    pub fn dispatch(&mut self, action: &Action) -> Result<()>
    where
        S: TextSource,
    {
        tracing::trace!(%action, "Dispatching action");
        match action {
            Action::ParentIcon(id) => self.on_parent_icon_clicked(*id).map(drop),
            Action::ParentLabel(id) => self.on_parent_label_clicked(*id).map(drop),
            Action::LeafIcon(id) => self.on_leaf_icon_clicked(*id),
            Action::LeafLabel(id) => self.on_leaf_label_clicked(*id),
            Action::ExpandAll => self.expand_all(),
            Action::CollapseAll => self.collapse_all(),
            Action::ToggleSection(name) => self.toggle_section(name).map(drop),
            Action::CopyCode(block) => self.copy_code(*block),
        }
    }

    // Code blocks

    /// Append a code block with a copy button.
    pub fn add_code_block(&mut self, code: &str) -> CopyButton {
        copy_code::add_code_block(
            &mut self.surface,
            &self.theme.icons.copy,
            &self.theme.classes.code_block,
            code,
        )
    }

    /// Swap a copy button between its idle and hover icon.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if the button is not on this page.
    pub fn set_copy_hover(&mut self, button: CopyButton, hovered: bool) -> Result<()> {
        copy_code::set_copy_hover(&mut self.surface, button, &self.theme.icons.copy, hovered)
    }
}

impl<S: RenderSurface + TextSource> NavPage<S> {
    /// Copy the text of a code block to the page's clipboard.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `block` has no text.
    pub fn copy_code(&mut self, block: ElementId) -> Result<()> {
        copy_code::copy_code(&self.surface, block, self.clipboard.as_mut())
    }
}

fn check_innermost(scopes: &[Scope], closing: Scope) -> Result<()> {
    match scopes.last() {
        Some(&innermost) if innermost != closing => Err(StructureError::Misnested {
            closing: closing.name(),
            innermost: innermost.name(),
        }
        .into()),
        _ => Ok(()),
    }
}
