//! Rendering surface abstraction.
//!
//! The widget never touches a concrete document model. It talks to a
//! [`RenderSurface`] that can:
//! - append elements in document order (containers stay open until closed),
//! - hand back an [`ElementId`] for every appended element, which the
//!   controllers keep in their own indexed tables for later lookup,
//! - toggle an element's visibility and swap an icon's image source.
//!
//! [`HtmlSurface`](crate::HtmlSurface) is the bundled implementation.

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::ids::{LeafId, ParentId};

/// Handle of an element appended to a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Event carried by a clickable element.
///
/// The hosting page routes a click back into the widget by passing the
/// element's action to [`NavPage::dispatch`](crate::NavPage::dispatch).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Parent node icon clicked.
    ParentIcon(ParentId),
    /// Parent node label clicked.
    ParentLabel(ParentId),
    /// Leaf node icon clicked.
    LeafIcon(LeafId),
    /// Leaf node label clicked.
    LeafLabel(LeafId),
    /// "Expand All" control clicked.
    ExpandAll,
    /// "Collapse All" control clicked.
    CollapseAll,
    /// Section heading (icon or title) clicked.
    ToggleSection(String),
    /// Copy button of a code block clicked.
    CopyCode(ElementId),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParentIcon(id) => write!(f, "parent-icon:{}", id.0),
            Self::ParentLabel(id) => write!(f, "parent-label:{}", id.0),
            Self::LeafIcon(id) => write!(f, "leaf-icon:{}", id.0),
            Self::LeafLabel(id) => write!(f, "leaf-label:{}", id.0),
            Self::ExpandAll => f.write_str("expand-all"),
            Self::CollapseAll => f.write_str("collapse-all"),
            Self::ToggleSection(name) => write!(f, "section:{name}"),
            Self::CopyCode(id) => write!(f, "copy-code:{}", id.0),
        }
    }
}

/// Error returned when an action attribute cannot be parsed.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid action: {0}")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ParseActionError(s.to_owned());
        match s {
            "expand-all" => return Ok(Self::ExpandAll),
            "collapse-all" => return Ok(Self::CollapseAll),
            _ => {}
        }

        let (kind, arg) = s.split_once(':').ok_or_else(invalid)?;
        if kind == "section" {
            if arg.is_empty() {
                return Err(invalid());
            }
            return Ok(Self::ToggleSection(arg.to_owned()));
        }

        let index: usize = arg.parse().map_err(|_| invalid())?;
        match kind {
            "parent-icon" => Ok(Self::ParentIcon(ParentId(index))),
            "parent-label" => Ok(Self::ParentLabel(ParentId(index))),
            "leaf-icon" => Ok(Self::LeafIcon(LeafId(index))),
            "leaf-label" => Ok(Self::LeafLabel(LeafId(index))),
            "copy-code" => Ok(Self::CopyCode(ElementId(index))),
            _ => Err(invalid()),
        }
    }
}

/// Navigation link attached to an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link<'a> {
    /// Target URL.
    pub href: &'a str,
    /// Browsing context the URL opens in.
    pub target: &'a str,
}

/// Element appended to a surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element<'a> {
    /// Generic block grouping other elements. Open until closed.
    Group {
        /// CSS class.
        class: &'a str,
    },
    /// Image whose source can be swapped later.
    Icon {
        src: &'a str,
        action: Option<Action>,
        link: Option<Link<'a>>,
    },
    /// Text label.
    Label {
        text: &'a str,
        class: &'a str,
        action: Option<Action>,
        link: Option<Link<'a>>,
    },
    /// Block whose visibility can be toggled. Open until closed.
    Container {
        visible: bool,
        /// Document-level anchor, used for deep links into sections.
        anchor: Option<&'a str>,
    },
    /// Heading of the given level (1..=6). Open until closed.
    Heading { level: u8, class: &'a str },
    /// Preformatted code whose text can be read back.
    CodeBlock { code: &'a str },
}

impl Element<'_> {
    /// Whether the element stays open for children until [`RenderSurface::close`].
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            Self::Group { .. } | Self::Container { .. } | Self::Heading { .. }
        )
    }
}

/// Rendering target for the widget.
pub trait RenderSurface {
    /// Append an element in document order and return its handle.
    ///
    /// Elements for which [`Element::is_open`] holds receive the following
    /// elements as children until [`close`](Self::close) is called.
    fn append(&mut self, element: Element<'_>) -> ElementId;

    /// Close the innermost open element.
    fn close(&mut self);

    /// Show or hide a container element.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `id` does not name a container.
    fn set_visible(&mut self, id: ElementId, visible: bool) -> Result<()>;

    /// Replace the image source of an icon element.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `id` does not name an icon.
    fn set_icon(&mut self, id: ElementId, src: &str) -> Result<()>;
}

/// Surfaces that can read back the text content of an element.
pub trait TextSource {
    /// Text content of the element.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if `id` does not name an element with text.
    fn text(&self, id: ElementId) -> Result<String>;
}
