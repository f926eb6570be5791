use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::Serialize;

use super::{Selector, Surface};

/// Handle to an element inside a [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MemNode(pub usize);

/// A mutation the surface applied, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddClass { node: MemNode, class: String },
    RemoveClass { node: MemNode, class: String },
    SetAttribute { node: MemNode, name: String, value: String },
    RemoveAttribute { node: MemNode, name: String },
    SetStyle { node: MemNode, property: String, value: String },
    CreateOverlay { node: MemNode, id: String },
    ScrollIntoView { node: MemNode },
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    parent: Option<usize>,
    children: Vec<usize>,
    attached: bool,
}

#[derive(Debug, Default)]
struct Tree {
    elements: Vec<Element>,
    log: Vec<Command>,
}

impl Tree {
    fn live(&self, node: MemNode) -> Option<&Element> {
        self.elements.get(node.0).filter(|el| el.attached)
    }

    fn live_mut(&mut self, node: MemNode) -> Option<&mut Element> {
        self.elements.get_mut(node.0).filter(|el| el.attached)
    }

    fn matches(el: &Element, selector: &Selector) -> bool {
        if let Some(tag) = selector.tag {
            if !el.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(attribute) = selector.attribute {
            if !el.attributes.contains_key(attribute) {
                return false;
            }
        }
        selector
            .classes
            .iter()
            .all(|class| el.classes.iter().any(|have| have == class))
    }

    fn collect(&self, at: usize, selector: &Selector, out: &mut Vec<MemNode>) {
        for &child in &self.elements[at].children {
            if Self::matches(&self.elements[child], selector) {
                out.push(MemNode(child));
            }
            self.collect(child, selector, out);
        }
    }
}

/// In-memory document used in place of a browser.
///
/// Node 0 is `<body>`. Every successful mutation is appended to a command log; mutations
/// against detached nodes are dropped without a log entry.
#[derive(Debug)]
pub struct MemorySurface {
    tree: RefCell<Tree>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        let body = Element {
            tag: "body".to_owned(),
            attached: true,
            ..Element::default()
        };
        Self {
            tree: RefCell::new(Tree {
                elements: vec![body],
                log: Vec::new(),
            }),
        }
    }

    pub fn root(&self) -> MemNode {
        MemNode(0)
    }

    /// Appends an element with `classes` (space separated) and `attributes` under `parent`.
    pub fn append(
        &self,
        parent: MemNode,
        tag: &str,
        classes: &str,
        attributes: &[(&str, &str)],
    ) -> MemNode {
        let mut tree = self.tree.borrow_mut();
        let index = tree.elements.len();
        let attached = tree.live(parent).is_some();
        tree.elements.push(Element {
            tag: tag.to_owned(),
            classes: classes.split_whitespace().map(str::to_owned).collect(),
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            styles: BTreeMap::new(),
            parent: Some(parent.0),
            children: Vec::new(),
            attached,
        });
        tree.elements[parent.0].children.push(index);
        MemNode(index)
    }

    /// Removes `node` and its subtree from the document.
    pub fn detach(&self, node: MemNode) {
        let mut tree = self.tree.borrow_mut();
        if node.0 == 0 || node.0 >= tree.elements.len() {
            return;
        }
        if let Some(parent) = tree.elements[node.0].parent.take() {
            tree.elements[parent].children.retain(|&c| c != node.0);
        }
        let mut stack = vec![node.0];
        while let Some(at) = stack.pop() {
            tree.elements[at].attached = false;
            stack.extend(tree.elements[at].children.iter().copied());
        }
    }

    pub fn style(&self, node: MemNode, property: &str) -> Option<String> {
        self.tree
            .borrow()
            .elements
            .get(node.0)
            .and_then(|el| el.styles.get(property).cloned())
    }

    pub fn classes(&self, node: MemNode) -> Vec<String> {
        self.tree
            .borrow()
            .elements
            .get(node.0)
            .map(|el| el.classes.clone())
            .unwrap_or_default()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.tree.borrow().log.clone()
    }

    pub fn take_commands(&self) -> Vec<Command> {
        std::mem::take(&mut self.tree.borrow_mut().log)
    }
}

impl Surface for MemorySurface {
    type Node = MemNode;

    fn element_by_id(&self, id: &str) -> Option<MemNode> {
        let tree = self.tree.borrow();
        tree.elements
            .iter()
            .position(|el| el.attached && el.attributes.get("id").is_some_and(|v| v == id))
            .map(MemNode)
    }

    fn query_all(&self, scope: Option<&MemNode>, selector: &Selector) -> Vec<MemNode> {
        let tree = self.tree.borrow();
        let root = scope.copied().unwrap_or(MemNode(0));
        let mut out = Vec::new();
        if tree.live(root).is_some() {
            tree.collect(root.0, selector, &mut out);
        }
        out
    }

    fn body(&self) -> Option<MemNode> {
        Some(MemNode(0))
    }

    fn add_class(&self, node: &MemNode, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(el) = tree.live_mut(*node) else {
            return;
        };
        if !el.classes.iter().any(|c| c == class) {
            el.classes.push(class.to_owned());
        }
        tree.log.push(Command::AddClass {
            node: *node,
            class: class.to_owned(),
        });
    }

    fn remove_class(&self, node: &MemNode, class: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(el) = tree.live_mut(*node) else {
            return;
        };
        el.classes.retain(|c| c != class);
        tree.log.push(Command::RemoveClass {
            node: *node,
            class: class.to_owned(),
        });
    }

    fn has_class(&self, node: &MemNode, class: &str) -> bool {
        self.tree
            .borrow()
            .live(*node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    fn attribute(&self, node: &MemNode, name: &str) -> Option<String> {
        self.tree
            .borrow()
            .live(*node)
            .and_then(|el| el.attributes.get(name).cloned())
    }

    fn set_attribute(&self, node: &MemNode, name: &str, value: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(el) = tree.live_mut(*node) else {
            return;
        };
        el.attributes.insert(name.to_owned(), value.to_owned());
        tree.log.push(Command::SetAttribute {
            node: *node,
            name: name.to_owned(),
            value: value.to_owned(),
        });
    }

    fn remove_attribute(&self, node: &MemNode, name: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(el) = tree.live_mut(*node) else {
            return;
        };
        el.attributes.remove(name);
        tree.log.push(Command::RemoveAttribute {
            node: *node,
            name: name.to_owned(),
        });
    }

    fn set_style(&self, node: &MemNode, property: &str, value: &str) {
        let mut tree = self.tree.borrow_mut();
        let Some(el) = tree.live_mut(*node) else {
            return;
        };
        el.styles.insert(property.to_owned(), value.to_owned());
        tree.log.push(Command::SetStyle {
            node: *node,
            property: property.to_owned(),
            value: value.to_owned(),
        });
    }

    fn create_overlay(&self, id: &str, css_text: &str) -> Option<MemNode> {
        let node = self.append(MemNode(0), "div", "", &[("id", id), ("style", css_text)]);
        self.tree.borrow_mut().log.push(Command::CreateOverlay {
            node,
            id: id.to_owned(),
        });
        Some(node)
    }

    fn scroll_into_view(&self, node: &MemNode) {
        let mut tree = self.tree.borrow_mut();
        if tree.live(*node).is_none() {
            return;
        }
        tree.log.push(Command::ScrollIntoView { node: *node });
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySurface, Selector, Surface};
    use serde_json::json;

    #[test]
    fn query_matches_compound_classes_in_document_order() {
        let surface = MemorySurface::new();
        let chart = surface.append(surface.root(), "div", "chart", &[("id", "chart-2")]);
        let a = surface.append(chart, "div", "territory france", &[]);
        let b = surface.append(chart, "div", "territory expansion", &[]);
        let c = surface.append(chart, "div", "territory expansion", &[]);

        let all = surface.query_all(Some(&chart), &Selector::classes(&["territory"]));
        assert_eq!(all, vec![a, b, c]);
        let expansions =
            surface.query_all(Some(&chart), &Selector::classes(&["territory", "expansion"]));
        assert_eq!(expansions, vec![b, c]);
    }

    #[test]
    fn detached_subtree_ignores_mutations() {
        let surface = MemorySurface::new();
        let chart = surface.append(surface.root(), "div", "", &[("id", "chart-1")]);
        let event = surface.append(chart, "div", "timeline-event", &[]);
        surface.detach(chart);

        surface.add_class(&event, "active");
        assert!(!surface.has_class(&event, "active"));
        assert!(surface.element_by_id("chart-1").is_none());
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn command_log_serializes_with_op_tags() {
        let surface = MemorySurface::new();
        let step = surface.append(surface.root(), "div", "step", &[("data-step", "1")]);
        surface.add_class(&step, "active");
        surface.set_style(&step, "opacity", "1");

        let log = serde_json::to_value(surface.commands()).expect("serialize");
        assert_eq!(
            log,
            json!([
                {"op": "add_class", "node": 1, "class": "active"},
                {"op": "set_style", "node": 1, "property": "opacity", "value": "1"},
            ])
        );
    }
}
