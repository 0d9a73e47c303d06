//! "Copy code" buttons for code blocks.
//!
//! A code block is appended together with a copy button. Clicking the
//! button reads the block's text back from the surface and hands it to a
//! [`Clipboard`]; hovering swaps the button between its idle and hover icon.
//! The command itself keeps no state.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;
use crate::surface::{Action, Element, ElementId, RenderSurface, TextSource};
use crate::theme::IconPair;

/// Platform clipboard capability.
pub trait Clipboard: Send {
    /// Replace the clipboard contents with `text`.
    fn set_text(&mut self, text: &str);
}

/// In-memory clipboard.
///
/// Clones share the same contents, so a clone handed to a page can be
/// inspected through the original.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) {
        *self
            .contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(text.to_owned());
    }
}

/// Handles of a rendered code block and its copy button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CopyButton {
    /// The code block.
    pub block: ElementId,
    /// The button icon.
    pub icon: ElementId,
}

/// Append a code block followed by its copy button.
pub fn add_code_block<S: RenderSurface>(
    surface: &mut S,
    icons: &IconPair,
    class: &str,
    code: &str,
) -> CopyButton {
    surface.append(Element::Group { class });
    let block = surface.append(Element::CodeBlock { code });
    let icon = surface.append(Element::Icon {
        src: &icons.off,
        action: Some(Action::CopyCode(block)),
        link: None,
    });
    surface.close();
    CopyButton { block, icon }
}

/// Copy the text of `block` to `clipboard`.
///
/// # Errors
///
/// Returns a lookup failure if `block` has no text on the surface.
pub fn copy_code<T: TextSource + ?Sized>(
    source: &T,
    block: ElementId,
    clipboard: &mut dyn Clipboard,
) -> Result<()> {
    let text = source.text(block)?;
    clipboard.set_text(&text);
    tracing::debug!(block = block.0, bytes = text.len(), "Copied code block");
    Ok(())
}

/// Show the hover icon while `hovered`, the idle icon otherwise.
///
/// # Errors
///
/// Returns a lookup failure if the button icon is not on the surface.
pub fn set_copy_hover<S: RenderSurface>(
    surface: &mut S,
    button: CopyButton,
    icons: &IconPair,
    hovered: bool,
) -> Result<()> {
    surface.set_icon(button.icon, icons.for_state(hovered))
}
