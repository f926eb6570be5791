use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    SvgElement,
};

use crate::error::{StoryError, StoryResult};
use crate::surface::{Selector, Surface};

/// [`Surface`] over the live document.
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> StoryResult<Self> {
        let window = web_sys::window().ok_or(StoryError::MissingWindow)?;
        let document = window.document().ok_or(StoryError::MissingDocument)?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Every element matching a raw CSS selector.
    pub fn select(&self, css: &str) -> Vec<Element> {
        match self.document.query_selector_all(css) {
            Ok(list) => collect(&list),
            Err(err) => {
                warn!(css, error = ?err, "querySelectorAll failed");
                Vec::new()
            }
        }
    }
}

fn collect(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn inline_style(node: &Element) -> Option<web_sys::CssStyleDeclaration> {
    if let Some(html) = node.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    node.dyn_ref::<SvgElement>().map(SvgElement::style)
}

impl Surface for DomSurface {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, scope: Option<&Element>, selector: &Selector) -> Vec<Element> {
        let css = selector.to_css();
        let found = match scope {
            Some(scope) => scope.query_selector_all(&css),
            None => self.document.query_selector_all(&css),
        };
        match found {
            Ok(list) => collect(&list),
            Err(err) => {
                warn!(css = %css, error = ?err, "querySelectorAll failed");
                Vec::new()
            }
        }
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            warn!(class, error = ?err, "classList.add failed");
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            warn!(class, error = ?err, "classList.remove failed");
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            warn!(name, error = ?err, "setAttribute failed");
        }
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        if let Err(err) = node.remove_attribute(name) {
            warn!(name, error = ?err, "removeAttribute failed");
        }
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(style) = inline_style(node) else {
            return;
        };
        if let Err(err) = style.set_property(property, value) {
            warn!(property, error = ?err, "style.setProperty failed");
        }
    }

    fn create_overlay(&self, id: &str, css_text: &str) -> Option<Element> {
        let body = self.document.body()?;
        let overlay = self.document.create_element("div").ok()?;
        overlay.set_id(id);
        self.set_attribute(&overlay, "style", css_text);
        if let Err(err) = body.append_child(&overlay) {
            warn!(id, error = ?err, "appendChild failed");
            return None;
        }
        Some(overlay)
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
