//! Icon resources and CSS class names used when rendering the widget.

/// Two image resources swapped with a boolean state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconPair {
    /// Image shown while the state is off (collapsed, unselected).
    pub off: String,
    /// Image shown while the state is on (expanded, selected).
    pub on: String,
}

impl IconPair {
    /// Create a pair from its off and on resources.
    pub fn new(off: impl Into<String>, on: impl Into<String>) -> Self {
        Self {
            off: off.into(),
            on: on.into(),
        }
    }

    /// Resource for the given state.
    #[must_use]
    pub fn for_state(&self, on: bool) -> &str {
        if on { &self.on } else { &self.off }
    }
}

/// Every icon the widget swaps.
///
/// Tree parents, tree leaves and page sections each get their own pair so
/// the three kinds are visually distinguishable. The copy pair is used by
/// code block copy buttons (`off` = idle, `on` = hovered).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconSet {
    /// Parent node: collapsed / expanded.
    pub parent: IconPair,
    /// Leaf node: unselected / selected.
    pub leaf: IconPair,
    /// Section: collapsed / expanded.
    pub section: IconPair,
    /// Copy-code button: idle / hovered.
    pub copy: IconPair,
}

impl IconSet {
    /// Icon set with every file placed under `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let url = |file: &str| join_url(base_url, file);
        Self {
            parent: IconPair::new(url("plus.png"), url("minus.png")),
            leaf: IconPair::new(url("page.png"), url("pageSelected.png")),
            section: IconPair::new(url("sectionPlus.gif"), url("sectionMinus.gif")),
            copy: IconPair::new(url("copycode.gif"), url("copycodeHighlight.gif")),
        }
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::with_base_url("../images")
    }
}

/// Join an icon file name onto a base URL with exactly one separator.
///
/// An empty base leaves the file name untouched.
#[must_use]
pub fn join_url(base_url: &str, file: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.is_empty() {
        file.to_owned()
    } else {
        format!("{base}/{}", file.trim_start_matches('/'))
    }
}

/// CSS classes attached to rendered elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    /// Block enclosing a parent node and its children.
    pub parent: String,
    /// Row holding one tree node.
    pub node: String,
    /// Parent node label.
    pub parent_label: String,
    /// Leaf node label.
    pub leaf_label: String,
    /// Row holding the expand/collapse-all controls.
    pub controls: String,
    /// Expand/collapse-all control labels.
    pub expand_collapse: String,
    /// Section heading title.
    pub section_title: String,
    /// Block holding a code block and its copy button.
    pub code_block: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            parent: "treeParent".to_owned(),
            node: "treeNode".to_owned(),
            parent_label: "parentTreeNode".to_owned(),
            leaf_label: "normalTreeNode".to_owned(),
            controls: "expandCollapseAll".to_owned(),
            expand_collapse: "expandCollapse".to_owned(),
            section_title: "sectionTitle".to_owned(),
            code_block: "codeBlock".to_owned(),
        }
    }
}

/// Icons and classes for one widget instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Theme {
    pub icons: IconSet,
    pub classes: ClassNames,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_icons() {
        let icons = IconSet::default();
        assert_eq!(icons.parent.off, "../images/plus.png");
        assert_eq!(icons.parent.on, "../images/minus.png");
        assert_eq!(icons.leaf.on, "../images/pageSelected.png");
        assert_eq!(icons.section.off, "../images/sectionPlus.gif");
    }

    #[test]
    fn test_for_state() {
        let pair = IconPair::new("a.png", "b.png");
        assert_eq!(pair.for_state(false), "a.png");
        assert_eq!(pair.for_state(true), "b.png");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("img", "a.png"), "img/a.png");
        assert_eq!(join_url("img/", "/a.png"), "img/a.png");
        assert_eq!(join_url("", "a.png"), "a.png");
        assert_eq!(
            join_url("https://cdn.example.com/", "a.png"),
            "https://cdn.example.com/a.png"
        );
    }
}
