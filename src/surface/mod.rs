//! Presentation commands the story issues against the page.
//!
//! The controller never touches the DOM directly: it asks a [`Surface`] to look up
//! elements and to flip classes, attributes and inline styles. The browser build
//! implements this over `web_sys`; tests use [`memory::MemorySurface`].

use std::fmt;

pub mod memory;

/// A simple compound selector: optional tag, all listed classes, optional attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<&'static str>,
    pub classes: &'static [&'static str],
    pub attribute: Option<&'static str>,
}

impl Selector {
    pub const fn classes(classes: &'static [&'static str]) -> Self {
        Self {
            tag: None,
            classes,
            attribute: None,
        }
    }

    pub const fn tag_with_attribute(tag: &'static str, attribute: &'static str) -> Self {
        Self {
            tag: Some(tag),
            classes: &[],
            attribute: Some(attribute),
        }
    }

    /// Renders the selector for `querySelectorAll`.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if let Some(tag) = self.tag {
            css.push_str(tag);
        }
        for class in self.classes {
            css.push('.');
            css.push_str(class);
        }
        if let Some(attribute) = self.attribute {
            css.push('[');
            css.push_str(attribute);
            css.push(']');
        }
        if css.is_empty() {
            css.push('*');
        }
        css
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// The rendering surface: element lookup plus the handful of mutations the story needs.
///
/// Mutations do not report failure. A surface that cannot apply one logs it and moves
/// on, so a missing or detached element never aborts a routine.
pub trait Surface {
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All matches in document order, searched under `scope` (or the whole document).
    fn query_all(&self, scope: Option<&Self::Node>, selector: &Selector) -> Vec<Self::Node>;

    fn query_first(&self, scope: Option<&Self::Node>, selector: &Selector) -> Option<Self::Node> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn body(&self) -> Option<Self::Node>;

    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    /// Creates a `<div id=…>` with the given inline style and appends it to the body.
    fn create_overlay(&self, id: &str, css_text: &str) -> Option<Self::Node>;

    fn scroll_into_view(&self, node: &Self::Node);
}
