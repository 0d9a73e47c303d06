//! Surfaces for exercising error paths in unit tests.

use std::collections::HashSet;

use crate::error::{LookupError, Result};
use crate::html::HtmlSurface;
use crate::surface::{Element, ElementId, RenderSurface};

/// HTML surface that refuses updates to selected elements.
#[derive(Debug, Default)]
pub(crate) struct RejectingSurface {
    pub(crate) inner: HtmlSurface,
    rejected: HashSet<ElementId>,
}

impl RejectingSurface {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fail every later `set_icon` / `set_visible` call on `id`.
    pub(crate) fn reject(&mut self, id: ElementId) {
        self.rejected.insert(id);
    }

    fn check(&self, id: ElementId) -> Result<()> {
        if self.rejected.contains(&id) {
            return Err(LookupError::Element(id).into());
        }
        Ok(())
    }
}

impl RenderSurface for RejectingSurface {
    fn append(&mut self, element: Element<'_>) -> ElementId {
        self.inner.append(element)
    }

    fn close(&mut self) {
        self.inner.close();
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) -> Result<()> {
        self.check(id)?;
        self.inner.set_visible(id, visible)
    }

    fn set_icon(&mut self, id: ElementId, src: &str) -> Result<()> {
        self.check(id)?;
        self.inner.set_icon(id, src)
    }
}
