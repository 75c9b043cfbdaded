//! Headless document: lookup, queries and event dispatch over an element tree.

use log::debug;

use super::events::{Listener, PointerEvent};
use super::html;
use super::node::{Element, Node};

/// Child-index path from the root element to a descendant.
///
/// Indices count all child nodes, text included, so a path stays valid as
/// long as no earlier sibling is inserted or removed.
pub type NodePath = Vec<usize>;

/// A document rooted at an `<html>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Element::new("html").with_child(Element::new("head")).with_child(Element::new("body")))
    }
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn body(&self) -> Option<&Element> {
        self.root.child_elements().find(|el| el.tag() == "body")
    }

    pub fn body_mut(&mut self) -> Option<&mut Element> {
        self.root
            .children_mut()
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|el| el.tag() == "body")
    }

    /// Resolve a path to an element. Empty path is the root.
    pub fn element_at(&self, path: &[usize]) -> Option<&Element> {
        let mut current = &self.root;
        for &idx in path {
            current = current.children().get(idx)?.as_element()?;
        }
        Some(current)
    }

    pub fn element_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut current = &mut self.root;
        for &idx in path {
            current = current.children_mut().get_mut(idx)?.as_element_mut()?;
        }
        Some(current)
    }

    /// Path to the first element (document order) whose id matches.
    pub fn find_by_id(&self, id: &str) -> Option<NodePath> {
        self.find_first(|el| el.id() == Some(id))
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        let path = self.find_by_id(id)?;
        self.element_at(&path)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        let path = self.find_by_id(id)?;
        self.element_at_mut(&path)
    }

    /// Paths to every element carrying `class`, in document order.
    pub fn query_class(&self, class: &str) -> Vec<NodePath> {
        let mut found = Vec::new();
        let mut path = Vec::new();
        walk(&self.root, &mut path, &mut |el, p| {
            if el.has_class(class) {
                found.push(p.to_vec());
            }
        });
        found
    }

    fn find_first(&self, pred: impl Fn(&Element) -> bool) -> Option<NodePath> {
        let mut found = None;
        let mut path = Vec::new();
        walk(&self.root, &mut path, &mut |el, p| {
            if found.is_none() && pred(el) {
                found = Some(p.to_vec());
            }
        });
        found
    }

    /// Dispatch a pointer move at `target`, bubbling from the target up to
    /// the root. Returns how many listeners handled the event.
    pub fn dispatch_pointer_move(&mut self, target: &[usize], event: PointerEvent) -> usize {
        if self.element_at(target).is_none() {
            debug!("pointer move on missing node {:?}", target);
            return 0;
        }

        let mut handled = 0;
        for depth in (0..=target.len()).rev() {
            let current = &target[..depth];
            let listeners = match self.element_at(current) {
                Some(el) if !el.listeners().is_empty() => el.listeners().to_vec(),
                _ => continue,
            };

            for listener in listeners {
                match listener {
                    Listener::Ripple(style) => {
                        if let Some(el) = self.element_at_mut(current) {
                            style.apply(el, &event);
                            handled += 1;
                        }
                    }
                    Listener::DelegatedRipple { class, style } => {
                        if let Some(hit) = self.closest_with_class(target, depth, &class) {
                            if let Some(el) = self.element_at_mut(&hit) {
                                style.apply(el, &event);
                                handled += 1;
                            }
                        }
                    }
                }
            }
        }
        handled
    }

    /// Closest element carrying `class` walking from `target` up to (and
    /// including) the ancestor at `floor` depth.
    fn closest_with_class(&self, target: &[usize], floor: usize, class: &str) -> Option<NodePath> {
        (floor..=target.len())
            .rev()
            .map(|depth| &target[..depth])
            .find(|p| self.element_at(p).is_some_and(|el| el.has_class(class)))
            .map(|p| p.to_vec())
    }

    /// Serialize as an HTML document.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        html::write_element(&self.root, &mut out);
        out.push('\n');
        out
    }
}

fn walk(el: &Element, path: &mut Vec<usize>, visit: &mut impl FnMut(&Element, &[usize])) {
    visit(el, path);
    for (idx, child) in el.children().iter().enumerate() {
        if let Node::Element(child) = child {
            path.push(idx);
            walk(child, path, visit);
            path.pop();
        }
    }
}
