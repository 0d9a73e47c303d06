//! Collapsible page sections.
//!
//! Sections are independent of the navigation tree: each has a unique,
//! caller-supplied name, a heading with its own icon pair and a content
//! container that starts hidden.

use std::collections::HashMap;

use crate::error::{LookupError, Result, StructureError};
use crate::surface::{Action, Element, ElementId, RenderSurface};
use crate::theme::{IconPair, Theme};

/// State of one collapsible section.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section {
    /// Unique name, also the anchor of the content container.
    pub name: String,
    /// Heading title.
    pub title: String,
    /// Heading level (1..=6).
    pub level: u8,
    /// CSS class of the heading.
    pub class: String,
    /// Whether the content is shown.
    pub expanded: bool,
}

#[derive(Clone, Copy, Debug)]
struct SectionSlot {
    icon: ElementId,
    container: ElementId,
}

/// Construction and toggling of page sections.
#[derive(Debug)]
pub struct SectionController {
    sections: Vec<Section>,
    slots: Vec<SectionSlot>,
    by_name: HashMap<String, usize>,
    /// Sections begun and not yet ended, innermost last.
    open: Vec<usize>,
    icons: IconPair,
}

impl SectionController {
    /// Create a controller using `icons` for collapsed/expanded headings.
    #[must_use]
    pub fn new(icons: IconPair) -> Self {
        Self {
            sections: Vec::new(),
            slots: Vec::new(),
            by_name: HashMap::new(),
            open: Vec::new(),
            icons,
        }
    }

    /// Render a section heading and open its hidden content container.
    ///
    /// The heading level is clamped to 1..=6. Both the icon and the title
    /// toggle the section when clicked.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::EmptySectionName`] for an empty `name` and
    /// [`StructureError::DuplicateSection`] if `name` is taken.
    pub fn begin_section<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        theme: &Theme,
        level: u8,
        class: &str,
        title: &str,
        name: &str,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(StructureError::EmptySectionName.into());
        }
        if self.by_name.contains_key(name) {
            return Err(StructureError::DuplicateSection(name.to_owned()).into());
        }
        let level = level.clamp(1, 6);
        let action = Action::ToggleSection(name.to_owned());

        surface.append(Element::Heading { level, class });
        let icon = surface.append(Element::Icon {
            src: &self.icons.off,
            action: Some(action.clone()),
            link: None,
        });
        surface.append(Element::Label {
            text: title,
            class: &theme.classes.section_title,
            action: Some(action),
            link: None,
        });
        surface.close();
        let container = surface.append(Element::Container {
            visible: false,
            anchor: Some(name),
        });

        let index = self.sections.len();
        self.sections.push(Section {
            name: name.to_owned(),
            title: title.to_owned(),
            level,
            class: class.to_owned(),
            expanded: false,
        });
        self.slots.push(SectionSlot { icon, container });
        self.by_name.insert(name.to_owned(), index);
        self.open.push(index);

        tracing::trace!(name, level, "Opened section");
        Ok(())
    }

    /// Close the innermost open section's content container.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::NoOpenSection`] if no section is open.
    pub fn end_section<S: RenderSurface>(&mut self, surface: &mut S) -> Result<()> {
        let index = self.open.pop().ok_or(StructureError::NoOpenSection)?;
        surface.close();
        tracing::trace!(name = %self.sections[index].name, "Closed section");
        Ok(())
    }

    /// Flip a section between collapsed and expanded.
    ///
    /// Returns the new `expanded` value.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if no section is named `name`.
    pub fn toggle<S: RenderSurface>(&mut self, surface: &mut S, name: &str) -> Result<bool> {
        let index = self.index_of(name)?;
        let expanded = !self.sections[index].expanded;
        self.apply(surface, index, expanded)?;
        tracing::debug!(name, expanded, "Toggled section");
        Ok(expanded)
    }

    /// Expand a section if it is collapsed; never collapses.
    ///
    /// Already expanded sections are left untouched, surface included.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if no section is named `name`.
    pub fn open<S: RenderSurface>(&mut self, surface: &mut S, name: &str) -> Result<()> {
        let index = self.index_of(name)?;
        if self.sections[index].expanded {
            return Ok(());
        }
        self.apply(surface, index, true)?;
        tracing::debug!(name, "Opened section");
        Ok(())
    }

    /// Whether the section named `name` is expanded.
    ///
    /// # Errors
    ///
    /// Returns a lookup failure if no section is named `name`.
    pub fn is_expanded(&self, name: &str) -> Result<bool> {
        Ok(self.sections[self.index_of(name)?].expanded)
    }

    /// Section named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.by_name.get(name).map(|&i| &self.sections[i])
    }

    /// All sections in construction order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections begun and not yet ended.
    #[must_use]
    pub fn open_depth(&self) -> usize {
        self.open.len()
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::Section(name.to_owned()).into())
    }

    fn apply<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        index: usize,
        expanded: bool,
    ) -> Result<()> {
        let slot = self.slots[index];
        surface.set_icon(slot.icon, self.icons.for_state(expanded))?;
        if let Err(err) = surface.set_visible(slot.container, expanded) {
            if let Err(restore) = surface.set_icon(slot.icon, self.icons.for_state(!expanded)) {
                tracing::warn!(%restore, "Failed to restore section icon");
            }
            return Err(err);
        }
        self.sections[index].expanded = expanded;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WidgetError;
    use crate::html::HtmlSurface;
    use crate::test_support::RejectingSurface;

    fn build(names: &[&str]) -> (HtmlSurface, SectionController) {
        let mut surface = HtmlSurface::new();
        let theme = Theme::default();
        let mut sections = SectionController::new(theme.icons.section.clone());
        for name in names {
            sections
                .begin_section(&mut surface, &theme, 2, "heading", name, name)
                .unwrap();
            sections.end_section(&mut surface).unwrap();
        }
        (surface, sections)
    }

    #[test]
    fn test_initially_collapsed() {
        let (surface, sections) = build(&["intro"]);
        assert!(!sections.is_expanded("intro").unwrap());
        let slot = sections.slots[0];
        assert_eq!(surface.is_visible(slot.container), Some(false));
        assert_eq!(surface.icon(slot.icon), Some("../images/sectionPlus.gif"));
    }

    #[test]
    fn test_toggle() {
        let (mut surface, mut sections) = build(&["intro"]);
        let slot = sections.slots[0];

        assert!(sections.toggle(&mut surface, "intro").unwrap());
        assert_eq!(surface.is_visible(slot.container), Some(true));
        assert_eq!(surface.icon(slot.icon), Some("../images/sectionMinus.gif"));

        assert!(!sections.toggle(&mut surface, "intro").unwrap());
        assert_eq!(surface.is_visible(slot.container), Some(false));
        assert_eq!(surface.icon(slot.icon), Some("../images/sectionPlus.gif"));
    }

    #[test]
    fn test_open_is_monotonic() {
        let (mut surface, mut sections) = build(&["intro"]);
        let slot = sections.slots[0];

        sections.open(&mut surface, "intro").unwrap();
        assert!(sections.is_expanded("intro").unwrap());
        let writes = surface.icon_writes();

        sections.open(&mut surface, "intro").unwrap();
        assert!(sections.is_expanded("intro").unwrap());
        assert_eq!(surface.icon_writes(), writes);
        assert_eq!(surface.icon(slot.icon), Some("../images/sectionMinus.gif"));
    }

    #[test]
    fn test_sections_are_independent() {
        let (mut surface, mut sections) = build(&["intro", "usage"]);
        sections.toggle(&mut surface, "usage").unwrap();
        assert!(!sections.is_expanded("intro").unwrap());
        assert!(sections.is_expanded("usage").unwrap());
    }

    #[test]
    fn test_unknown_section() {
        let (mut surface, mut sections) = build(&["intro"]);
        assert_eq!(
            sections.toggle(&mut surface, "missing"),
            Err(WidgetError::Lookup(LookupError::Section("missing".to_owned())))
        );
        assert!(sections.open(&mut surface, "missing").is_err());
    }

    #[test]
    fn test_duplicate_section() {
        let (mut surface, mut sections) = build(&["intro"]);
        let err = sections
            .begin_section(&mut surface, &Theme::default(), 2, "heading", "Again", "intro")
            .unwrap_err();
        assert_eq!(
            err,
            WidgetError::Structure(StructureError::DuplicateSection("intro".to_owned()))
        );
    }

    #[test]
    fn test_end_section_without_open_section() {
        let (mut surface, mut sections) = build(&[]);
        assert_eq!(
            sections.end_section(&mut surface),
            Err(WidgetError::Structure(StructureError::NoOpenSection))
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut surface = HtmlSurface::new();
        let theme = Theme::default();
        let mut sections = SectionController::new(theme.icons.section.clone());
        assert_eq!(
            sections.begin_section(&mut surface, &theme, 2, "heading", "Untitled", ""),
            Err(WidgetError::Structure(StructureError::EmptySectionName))
        );
        assert!(surface.is_empty());
        assert_eq!(sections.open_depth(), 0);
    }

    #[test]
    fn test_failed_toggle_leaves_section_unchanged() {
        let mut surface = RejectingSurface::new();
        let theme = Theme::default();
        let mut sections = SectionController::new(theme.icons.section.clone());
        sections
            .begin_section(&mut surface, &theme, 2, "heading", "Intro", "intro")
            .unwrap();
        sections.end_section(&mut surface).unwrap();
        let slot = sections.slots[0];
        surface.reject(slot.container);

        assert_eq!(
            sections.toggle(&mut surface, "intro"),
            Err(WidgetError::Lookup(LookupError::Element(slot.container)))
        );
        assert!(!sections.is_expanded("intro").unwrap());
        assert_eq!(surface.inner.icon(slot.icon), Some("../images/sectionPlus.gif"));
        assert_eq!(surface.inner.is_visible(slot.container), Some(false));
    }

    #[test]
    fn test_heading_level_clamped() {
        let mut surface = HtmlSurface::new();
        let theme = Theme::default();
        let mut sections = SectionController::new(theme.icons.section.clone());
        sections
            .begin_section(&mut surface, &theme, 9, "heading", "Deep", "deep")
            .unwrap();
        let section = sections.get("deep").unwrap();
        assert_eq!(section.level, 6);
        assert_eq!(section.class, "heading");
    }
}
