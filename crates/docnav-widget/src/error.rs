//! Widget error types.
//!
//! Both categories are programmer errors: a broken builder call sequence or
//! an event that names something the page never constructed. They are
//! returned instead of ignored so icon and visibility state never drift
//! apart.

use crate::ids::{LeafId, ParentId};
use crate::surface::ElementId;

/// Builder call sequence violated the construction contract.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// `end_parent` without a matching `begin_parent`.
    #[error("no open parent")]
    NoOpenParent,
    /// `finish` while parents are still open.
    #[error("{0} parent node(s) left open")]
    UnclosedParents(usize),
    /// `end_section` without a matching `begin_section`.
    #[error("no open section")]
    NoOpenSection,
    /// Two sections constructed with the same name.
    #[error("section already exists: {0}")]
    DuplicateSection(String),
    /// Section constructed without a name.
    #[error("section name cannot be empty")]
    EmptySectionName,
    /// A scope ended while a scope of the other kind opened inside it is
    /// still open.
    #[error("cannot end {closing} while {innermost} is open")]
    Misnested {
        closing: &'static str,
        innermost: &'static str,
    },
    /// Tree controller used before construction finished.
    #[error("tree construction not finished")]
    NotFinished,
    /// Tree builder used after construction finished.
    #[error("tree construction already finished")]
    AlreadyFinished,
}

/// An event referenced an identity with no corresponding node or element.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("unknown {0}")]
    Parent(ParentId),
    #[error("unknown {0}")]
    Leaf(LeafId),
    #[error("unknown section: {0}")]
    Section(String),
    #[error("unknown element: {0}")]
    Element(ElementId),
}

/// Error returned by widget operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    /// Structural contract violation.
    #[error("structural contract violation: {0}")]
    Structure(#[from] StructureError),
    /// Lookup failure.
    #[error("lookup failure: {0}")]
    Lookup(#[from] LookupError),
}

/// Result alias for widget operations.
pub type Result<T, E = WidgetError> = std::result::Result<T, E>;
