//! Collapsible navigation tree and section widget for static documentation pages.
//!
//! This crate provides:
//! - [`TreeBuilder`]: assembles parent and leaf nodes from ordered builder calls
//! - [`NodeController`]: expand/collapse of parents and single leaf selection
//! - [`SectionController`]: independent collapsible page sections
//! - [`NavPage`]: one widget instance tying the above to a [`RenderSurface`]
//! - [`HtmlSurface`]: rendering surface producing an HTML fragment
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), docnav_widget::WidgetError> {
//! use docnav_widget::{HtmlSurface, LeafId, NavPage, ParentId};
//!
//! let mut page = NavPage::new(HtmlSurface::new());
//! page.begin_parent("Guides")?;
//! page.add_leaf("Intro", "intro.html", "main")?;
//! page.end_parent()?;
//! page.add_expand_collapse_all_controls()?;
//! page.finish_tree()?;
//!
//! page.on_parent_icon_clicked(ParentId(0))?;
//! page.on_leaf_label_clicked(LeafId(0))?;
//!
//! let html = page.surface().render();
//! assert!(html.contains("minus.png"));
//! # Ok(())
//! # }
//! ```

mod builder;
mod controller;
mod copy_code;
mod error;
mod html;
mod ids;
mod page;
mod section;
mod surface;
#[cfg(test)]
mod test_support;
mod theme;
mod tree;

pub use builder::TreeBuilder;
pub use controller::NodeController;
pub use copy_code::{
    Clipboard, CopyButton, MemoryClipboard, add_code_block, copy_code, set_copy_hover,
};
pub use error::{LookupError, Result, StructureError, WidgetError};
pub use html::{HtmlSurface, escape_html};
pub use ids::{LeafId, ParentId};
pub use page::NavPage;
pub use section::{Section, SectionController};
pub use surface::{
    Action, Element, ElementId, Link, ParseActionError, RenderSurface, TextSource,
};
pub use theme::{ClassNames, IconPair, IconSet, Theme, join_url};
pub use tree::{LeafNode, NavTree, ParentNode, TreeNode};
