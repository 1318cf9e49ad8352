//! In-memory document
//!
//! A small element tree implementing [`Dom`], with a manual clock for
//! settle timers and a dispatcher that bubbles clicks through the listener
//! plan the same way a browser would. Used for headless runs and tests.
//!
//! Supported selectors: `#id`, `.class`, `tag`, compounds such as
//! `div.slide.first`, and comma-separated lists of those.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use crate::controller::{EventKind, Input, ListenTarget, MobileUi, Propagation, Response};
use crate::dom::{Dom, Viewport};

/// Handle to an element in a [`MemoryDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    transform: Option<String>,
    scroll_top: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct PendingTimer {
    due_ms: u64,
    generation: u64,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Debug, Default)]
struct Tree {
    elements: Vec<Element>,
    timers: Vec<PendingTimer>,
    now_ms: u64,
    scrolls: Vec<(NodeId, f64)>,
}

/// Timer guard handed out by [`MemoryDom::start_timer`]; dropping cancels it.
#[derive(Debug)]
pub struct MemoryTimer {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for MemoryTimer {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

/// Shared handle to an in-memory element tree
#[derive(Debug, Clone)]
pub struct MemoryDom {
    tree: Rc<RefCell<Tree>>,
    viewport: Viewport,
}

impl MemoryDom {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            tree: Rc::new(RefCell::new(Tree::default())),
            viewport,
        }
    }

    /// Append an element described by a compound selector (`div#id.a.b`).
    pub fn append(&self, parent: Option<NodeId>, spec: &str) -> NodeId {
        let selector = SimpleSelector::parse(spec);
        let mut tree = self.tree.borrow_mut();
        let id = NodeId(tree.elements.len());
        tree.elements.push(Element {
            tag: selector.tag.unwrap_or_else(|| "div".to_string()),
            id: selector.id,
            classes: selector.classes,
            parent,
            ..Element::default()
        });
        if let Some(parent) = parent {
            tree.elements[parent.0].children.push(id);
        }
        id
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.tree.borrow_mut().elements[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn text(&self, node: NodeId) -> String {
        self.tree.borrow().elements[node.0].text.clone()
    }

    pub fn transform(&self, node: NodeId) -> Option<String> {
        self.tree.borrow().elements[node.0].transform.clone()
    }

    /// Move a scroll container without dispatching a scroll event.
    pub fn set_scroll_top(&self, node: NodeId, top: f64) {
        self.tree.borrow_mut().elements[node.0].scroll_top = top;
    }

    /// Smooth scrolls requested so far, oldest first
    pub fn scroll_requests(&self) -> Vec<(NodeId, f64)> {
        self.tree.borrow().scrolls.clone()
    }

    /// Timers scheduled and neither cancelled nor fired
    pub fn pending_timers(&self) -> usize {
        self.tree
            .borrow()
            .timers
            .iter()
            .filter(|timer| !timer.cancelled.get())
            .count()
    }

    /// Move the clock forward and return the generations of timers now due.
    pub fn advance(&self, ms: u64) -> Vec<u64> {
        let mut tree = self.tree.borrow_mut();
        tree.now_ms += ms;
        let now = tree.now_ms;
        let (due, waiting): (Vec<_>, Vec<_>) = tree
            .timers
            .drain(..)
            .filter(|timer| !timer.cancelled.get())
            .partition(|timer| timer.due_ms <= now);
        tree.timers = waiting;
        due.into_iter().map(|timer| timer.generation).collect()
    }

    fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let mut chain = vec![node];
        let mut current = tree.elements[node.0].parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = tree.elements[parent.0].parent;
        }
        chain
    }

    fn descendants(&self, scope: Option<NodeId>) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let mut stack: Vec<NodeId> = match scope {
            Some(scope) => tree.elements[scope.0].children.iter().rev().copied().collect(),
            None => (0..tree.elements.len())
                .rev()
                .map(NodeId)
                .filter(|id| tree.elements[id.0].parent.is_none())
                .collect(),
        };
        let mut order = Vec::new();
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(tree.elements[node.0].children.iter().rev().copied());
        }
        order
    }

    fn matches(&self, node: NodeId, selectors: &[SimpleSelector]) -> bool {
        let tree = self.tree.borrow();
        let element = &tree.elements[node.0];
        selectors.iter().any(|selector| selector.matches(element))
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;
    type Timer = MemoryTimer;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn query(&self, scope: Option<&NodeId>, selector: &str) -> Option<NodeId> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn query_all(&self, scope: Option<&NodeId>, selector: &str) -> Vec<NodeId> {
        let selectors = SimpleSelector::parse_list(selector);
        self.descendants(scope.copied())
            .into_iter()
            .filter(|node| self.matches(*node, &selectors))
            .collect()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.tree.borrow().elements[node.0].attributes.get(name).cloned()
    }

    fn toggle_class(&self, node: &NodeId, class: &str) {
        let on = !self.has_class(node, class);
        self.set_class(node, class, on);
    }

    fn set_class(&self, node: &NodeId, class: &str, on: bool) {
        let mut tree = self.tree.borrow_mut();
        let classes = &mut tree.elements[node.0].classes;
        let present = classes.iter().any(|c| c == class);
        if on && !present {
            classes.push(class.to_string());
        } else if !on && present {
            classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree.borrow().elements[node.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.tree.borrow_mut().elements[node.0].text = text.to_string();
    }

    fn image_source(&self, node: &NodeId) -> Option<String> {
        self.attribute(node, "src")
    }

    fn set_image_source(&self, node: &NodeId, src: &str) {
        self.set_attribute(*node, "src", src);
    }

    fn set_transform(&self, node: &NodeId, transform: &str) {
        self.tree.borrow_mut().elements[node.0].transform = Some(transform.to_string());
    }

    fn scroll_top(&self, node: &NodeId) -> f64 {
        self.tree.borrow().elements[node.0].scroll_top
    }

    fn smooth_scroll_to(&self, node: &NodeId, top: f64) {
        let mut tree = self.tree.borrow_mut();
        tree.elements[node.0].scroll_top = top;
        tree.scrolls.push((*node, top));
    }

    fn start_timer(&self, delay: Duration, generation: u64) -> MemoryTimer {
        let cancelled = Rc::new(Cell::new(false));
        let mut tree = self.tree.borrow_mut();
        let due_ms = tree.now_ms + delay.as_millis() as u64;
        tree.timers.push(PendingTimer {
            due_ms,
            generation,
            cancelled: cancelled.clone(),
        });
        MemoryTimer { cancelled }
    }
}

/// Browser-like event delivery over the controller's listener plan
impl MobileUi<MemoryDom> {
    /// Click `node`, bubbling to ancestors until a boundary stops it.
    pub fn click(&mut self, node: NodeId) {
        for current in self.dom().ancestors_inclusive(node) {
            let bindings: Vec<_> = self
                .listeners()
                .iter()
                .filter(|l| l.kind == EventKind::Click && l.target == ListenTarget::Node(current))
                .map(|l| l.binding)
                .collect();
            let mut stopped = false;
            for binding in bindings {
                self.dispatch(binding, Input::Click { target: Some(node) });
                stopped |= binding.propagation() == Propagation::Stop;
            }
            if stopped {
                return;
            }
        }
    }

    /// Set the container's scroll offset and fire one scroll event on it.
    pub fn scroll_container_to(&mut self, container: NodeId, top: f64) {
        self.dom().set_scroll_top(container, top);
        self.deliver(ListenTarget::Node(container), EventKind::Scroll, || Input::Scroll);
    }

    /// Touch down at `start_y`, lift at `end_y` on `container`.
    pub fn swipe(&mut self, container: NodeId, start_y: f64, end_y: f64) {
        self.deliver(ListenTarget::Node(container), EventKind::TouchStart, || {
            Input::Touch { screen_y: start_y }
        });
        self.deliver(ListenTarget::Node(container), EventKind::TouchEnd, || {
            Input::Touch { screen_y: end_y }
        });
    }

    /// Key press delivered to the document.
    pub fn press(&mut self, key: &str) -> Response {
        self.deliver(ListenTarget::Document, EventKind::KeyDown, || {
            Input::Key(key.to_string())
        })
    }

    /// Advance the clock and fire whatever settle timers came due.
    pub fn advance(&mut self, ms: u64) {
        for generation in self.dom().advance(ms) {
            self.settle(generation);
        }
    }

    fn deliver(
        &mut self,
        target: ListenTarget<NodeId>,
        kind: EventKind,
        input: impl Fn() -> Input<NodeId>,
    ) -> Response {
        let bindings: Vec<_> = self
            .listeners()
            .iter()
            .filter(|l| l.kind == kind && l.target == target)
            .map(|l| l.binding)
            .collect();
        let mut response = Response::default();
        for binding in bindings {
            response.prevent_default |= self.dispatch(binding, input()).prevent_default;
        }
        response
    }
}

#[derive(Debug, Default, PartialEq)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl SimpleSelector {
    fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::parse)
            .collect()
    }

    fn parse(spec: &str) -> Self {
        let mut selector = SimpleSelector::default();
        let mut current = String::new();
        let mut kind = ' ';
        for c in spec.trim().chars().chain(std::iter::once('.')) {
            if c == '.' || c == '#' {
                if !current.is_empty() {
                    match kind {
                        '.' => selector.classes.push(std::mem::take(&mut current)),
                        '#' => selector.id = Some(std::mem::take(&mut current)),
                        _ => selector.tag = Some(std::mem::take(&mut current)),
                    }
                }
                kind = c;
            } else {
                current.push(c);
            }
        }
        selector
    }

    fn matches(&self, element: &Element) -> bool {
        if self.tag.is_none() && self.id.is_none() && self.classes.is_empty() {
            return false;
        }
        self.tag.as_ref().map_or(true, |tag| *tag == element.tag)
            && self
                .id
                .as_ref()
                .map_or(true, |id| element.id.as_ref() == Some(id))
            && self
                .classes
                .iter()
                .all(|class| element.classes.iter().any(|c| c == class))
    }
}
