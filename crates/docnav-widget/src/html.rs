//! HTML rendering surface.
//!
//! [`HtmlSurface`] records appended elements in document order together with
//! their mutable state (visibility, icon source). [`HtmlSurface::render`]
//! produces an HTML fragment reflecting the current state, so the same
//! surface can be re-rendered after every event.
//!
//! Clickable elements carry their [`Action`] in a `data-action` attribute;
//! the hosting page parses it back with [`str::parse`] and hands it to
//! [`NavPage::dispatch`](crate::NavPage::dispatch).

use std::fmt::Write;

use crate::error::{LookupError, Result};
use crate::surface::{Action, Element, ElementId, Link, RenderSurface, TextSource};

/// Owned copy of an appended element plus its mutable state.
#[derive(Clone, Debug)]
enum Stored {
    Group {
        class: String,
    },
    Icon {
        src: String,
        action: Option<Action>,
        link: Option<(String, String)>,
    },
    Label {
        text: String,
        class: String,
        action: Option<Action>,
        link: Option<(String, String)>,
    },
    Container {
        visible: bool,
        anchor: Option<String>,
    },
    Heading {
        level: u8,
        class: String,
    },
    CodeBlock {
        code: String,
    },
}

impl From<Element<'_>> for Stored {
    fn from(element: Element<'_>) -> Self {
        match element {
            Element::Group { class } => Self::Group {
                class: class.to_owned(),
            },
            Element::Icon { src, action, link } => Self::Icon {
                src: src.to_owned(),
                action,
                link: owned_link(link),
            },
            Element::Label {
                text,
                class,
                action,
                link,
            } => Self::Label {
                text: text.to_owned(),
                class: class.to_owned(),
                action,
                link: owned_link(link),
            },
            Element::Container { visible, anchor } => Self::Container {
                visible,
                anchor: anchor.map(str::to_owned),
            },
            Element::Heading { level, class } => Self::Heading {
                level,
                class: class.to_owned(),
            },
            Element::CodeBlock { code } => Self::CodeBlock {
                code: code.to_owned(),
            },
        }
    }
}

fn owned_link(link: Option<Link<'_>>) -> Option<(String, String)> {
    link.map(|l| (l.href.to_owned(), l.target.to_owned()))
}

/// Position in the document.
#[derive(Clone, Copy, Debug)]
enum Event {
    /// Element without children.
    Empty(ElementId),
    /// Opening tag of an element with children.
    Start(ElementId),
    /// Closing tag of an element with children.
    End(ElementId),
}

/// Rendering surface producing an HTML fragment.
#[derive(Debug, Default)]
pub struct HtmlSurface {
    elements: Vec<Stored>,
    events: Vec<Event>,
    open: Vec<ElementId>,
    icon_writes: usize,
}

impl HtmlSurface {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current visibility of a container, `None` if `id` is not a container.
    #[must_use]
    pub fn is_visible(&self, id: ElementId) -> Option<bool> {
        match self.elements.get(id.0)? {
            Stored::Container { visible, .. } => Some(*visible),
            _ => None,
        }
    }

    /// Current source of an icon, `None` if `id` is not an icon.
    #[must_use]
    pub fn icon(&self, id: ElementId) -> Option<&str> {
        match self.elements.get(id.0)? {
            Stored::Icon { src, .. } => Some(src),
            _ => None,
        }
    }

    /// Number of icon source writes performed since creation.
    #[must_use]
    pub fn icon_writes(&self) -> usize {
        self.icon_writes
    }

    /// Number of elements appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Render the document as an HTML fragment.
    ///
    /// Elements left open are closed at the end of the fragment.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.events.len() * 64);
        for event in &self.events {
            match *event {
                Event::Empty(id) | Event::Start(id) => self.write_start(id, &mut out),
                Event::End(id) => self.write_end(id, &mut out),
            }
        }
        for &id in self.open.iter().rev() {
            self.write_end(id, &mut out);
        }
        out
    }

    fn write_start(&self, id: ElementId, out: &mut String) {
        match &self.elements[id.0] {
            Stored::Group { class } => {
                write!(out, r#"<div class="{}">"#, escape_html(class)).unwrap();
            }
            Stored::Icon { src, action, link } => {
                if let Some((href, target)) = link {
                    write_link_start(href, target, out);
                }
                write!(out, r#"<img src="{}""#, escape_html(src)).unwrap();
                write_action(action.as_ref(), out);
                out.push('>');
                if link.is_some() {
                    out.push_str("</a>");
                }
            }
            Stored::Label {
                text,
                class,
                action,
                link,
            } => {
                let tag = if let Some((href, target)) = link {
                    write!(
                        out,
                        r#"<a class="{}" href="{}" target="{}""#,
                        escape_html(class),
                        escape_html(href),
                        escape_html(target)
                    )
                    .unwrap();
                    "a"
                } else {
                    write!(out, r#"<span class="{}""#, escape_html(class)).unwrap();
                    "span"
                };
                write_action(action.as_ref(), out);
                write!(out, ">{}</{tag}>", escape_html(text)).unwrap();
            }
            Stored::Container { visible, anchor } => {
                out.push_str("<div");
                if let Some(anchor) = anchor {
                    write!(out, r#" id="{}""#, escape_html(anchor)).unwrap();
                }
                if !visible {
                    out.push_str(r#" style="display:none""#);
                }
                out.push('>');
            }
            Stored::Heading { level, class } => {
                write!(out, r#"<h{level} class="{}">"#, escape_html(class)).unwrap();
            }
            Stored::CodeBlock { code } => {
                write!(out, "<pre><code>{}</code></pre>", escape_html(code)).unwrap();
            }
        }
    }

    fn write_end(&self, id: ElementId, out: &mut String) {
        match &self.elements[id.0] {
            Stored::Heading { level, .. } => write!(out, "</h{level}>").unwrap(),
            _ => out.push_str("</div>"),
        }
    }
}

fn write_link_start(href: &str, target: &str, out: &mut String) {
    write!(
        out,
        r#"<a href="{}" target="{}">"#,
        escape_html(href),
        escape_html(target)
    )
    .unwrap();
}

fn write_action(action: Option<&Action>, out: &mut String) {
    if let Some(action) = action {
        write!(
            out,
            r#" data-action="{}""#,
            escape_html(&action.to_string())
        )
        .unwrap();
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl RenderSurface for HtmlSurface {
    fn append(&mut self, element: Element<'_>) -> ElementId {
        let id = ElementId(self.elements.len());
        let is_open = element.is_open();
        self.elements.push(Stored::from(element));
        if is_open {
            self.events.push(Event::Start(id));
            self.open.push(id);
        } else {
            self.events.push(Event::Empty(id));
        }
        id
    }

    fn close(&mut self) {
        if let Some(id) = self.open.pop() {
            self.events.push(Event::End(id));
        } else {
            tracing::warn!("Close without an open element");
        }
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) -> Result<()> {
        match self.elements.get_mut(id.0) {
            Some(Stored::Container { visible: current, .. }) => {
                *current = visible;
                Ok(())
            }
            _ => Err(LookupError::Element(id).into()),
        }
    }

    fn set_icon(&mut self, id: ElementId, src: &str) -> Result<()> {
        match self.elements.get_mut(id.0) {
            Some(Stored::Icon { src: current, .. }) => {
                src.clone_into(current);
                self.icon_writes += 1;
                Ok(())
            }
            _ => Err(LookupError::Element(id).into()),
        }
    }
}

impl TextSource for HtmlSurface {
    fn text(&self, id: ElementId) -> Result<String> {
        match self.elements.get(id.0) {
            Some(Stored::CodeBlock { code }) => Ok(code.clone()),
            Some(Stored::Label { text, .. }) => Ok(text.clone()),
            _ => Err(LookupError::Element(id).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::WidgetError;
    use crate::ids::{LeafId, ParentId};

    #[test]
    fn test_render_group_with_children() {
        let mut surface = HtmlSurface::new();
        surface.append(Element::Group { class: "row" });
        surface.append(Element::Label {
            text: "Hello",
            class: "label",
            action: None,
            link: None,
        });
        surface.close();
        assert_eq!(
            surface.render(),
            r#"<div class="row"><span class="label">Hello</span></div>"#
        );
    }

    #[test]
    fn test_render_linked_icon_and_label() {
        let mut surface = HtmlSurface::new();
        let link = Some(Link {
            href: "intro.html",
            target: "main",
        });
        surface.append(Element::Icon {
            src: "page.png",
            action: Some(Action::LeafIcon(LeafId(0))),
            link,
        });
        surface.append(Element::Label {
            text: "Intro",
            class: "normalTreeNode",
            action: Some(Action::LeafLabel(LeafId(0))),
            link,
        });
        assert_eq!(
            surface.render(),
            concat!(
                r#"<a href="intro.html" target="main"><img src="page.png" data-action="leaf-icon:0"></a>"#,
                r#"<a class="normalTreeNode" href="intro.html" target="main" data-action="leaf-label:0">Intro</a>"#,
            )
        );
    }

    #[test]
    fn test_render_reflects_current_state() {
        let mut surface = HtmlSurface::new();
        let icon = surface.append(Element::Icon {
            src: "plus.png",
            action: Some(Action::ParentIcon(ParentId(0))),
            link: None,
        });
        let container = surface.append(Element::Container {
            visible: false,
            anchor: Some("details"),
        });
        surface.close();
        assert_eq!(
            surface.render(),
            r#"<img src="plus.png" data-action="parent-icon:0"><div id="details" style="display:none"></div>"#
        );

        surface.set_icon(icon, "minus.png").unwrap();
        surface.set_visible(container, true).unwrap();
        assert_eq!(
            surface.render(),
            r#"<img src="minus.png" data-action="parent-icon:0"><div id="details"></div>"#
        );
        assert_eq!(surface.icon_writes(), 1);
    }

    #[test]
    fn test_render_heading_and_code_block() {
        let mut surface = HtmlSurface::new();
        surface.append(Element::Heading {
            level: 2,
            class: "h",
        });
        surface.close();
        surface.append(Element::CodeBlock {
            code: "if a < b { \"x\" }",
        });
        assert_eq!(
            surface.render(),
            r#"<h2 class="h"></h2><pre><code>if a &lt; b { &quot;x&quot; }</code></pre>"#
        );
    }

    #[test]
    fn test_render_closes_open_elements() {
        let mut surface = HtmlSurface::new();
        surface.append(Element::Group { class: "outer" });
        surface.append(Element::Heading {
            level: 1,
            class: "h",
        });
        assert_eq!(surface.render(), r#"<div class="outer"><h1 class="h"></h1></div>"#);
    }

    #[test]
    fn test_labels_are_escaped() {
        let mut surface = HtmlSurface::new();
        surface.append(Element::Label {
            text: "<script>",
            class: "a\"b",
            action: Some(Action::ToggleSection("x&y".to_owned())),
            link: None,
        });
        assert_eq!(
            surface.render(),
            r#"<span class="a&quot;b" data-action="section:x&amp;y">&lt;script&gt;</span>"#
        );
    }

    #[test]
    fn test_wrong_element_kind_is_lookup_failure() {
        let mut surface = HtmlSurface::new();
        let group = surface.append(Element::Group { class: "row" });
        assert_eq!(
            surface.set_icon(group, "x.png"),
            Err(WidgetError::Lookup(LookupError::Element(group)))
        );
        assert_eq!(
            surface.set_visible(ElementId(42), true),
            Err(WidgetError::Lookup(LookupError::Element(ElementId(42))))
        );
    }

    #[test]
    fn test_text_source() {
        let mut surface = HtmlSurface::new();
        let code = surface.append(Element::CodeBlock { code: "cargo doc" });
        let group = surface.append(Element::Group { class: "row" });
        assert_eq!(surface.text(code).unwrap(), "cargo doc");
        assert!(surface.text(group).is_err());
    }
}
