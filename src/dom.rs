//! `web-sys` implementation of the controller's document access

use std::cell::RefCell;
use std::rc::Weak;
use std::time::Duration;

use gloo::timers::callback::Timeout;
use loresite_core::{Dom, MobileUi, Viewport};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, ScrollBehavior, ScrollToOptions, Window};

/// Live browser document
pub struct WebDom {
    window: Window,
    document: Document,
    /// Controller that settle timers report back to
    ui: Weak<RefCell<MobileUi<WebDom>>>,
}

impl WebDom {
    pub fn new(window: Window, document: Document, ui: Weak<RefCell<MobileUi<WebDom>>>) -> Self {
        Self {
            window,
            document,
            ui,
        }
    }

    fn window_size(&self) -> (f64, f64) {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);
        (width, height)
    }
}

impl Dom for WebDom {
    type Node = Element;
    type Timer = Timeout;

    fn viewport(&self) -> Viewport {
        let (width, height) = self.window_size();
        Viewport::new(width, height)
    }

    fn query(&self, scope: Option<&Element>, selector: &str) -> Option<Element> {
        let found = match scope {
            Some(scope) => scope.query_selector(selector),
            None => self.document.query_selector(selector),
        };
        found.ok().flatten()
    }

    fn query_all(&self, scope: Option<&Element>, selector: &str) -> Vec<Element> {
        let list = match scope {
            Some(scope) => scope.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        };
        let Ok(list) = list else {
            debug!(selector, "selector rejected by the browser");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn toggle_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().toggle(class);
    }

    fn set_class(&self, node: &Element, class: &str, on: bool) {
        let _ = node.class_list().toggle_with_force(class, on);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn image_source(&self, node: &Element) -> Option<String> {
        match node.dyn_ref::<HtmlImageElement>() {
            Some(image) => Some(image.src()),
            None => node.get_attribute("src"),
        }
    }

    fn set_image_source(&self, node: &Element, src: &str) {
        match node.dyn_ref::<HtmlImageElement>() {
            Some(image) => image.set_src(src),
            None => {
                let _ = node.set_attribute("src", src);
            }
        }
    }

    fn set_transform(&self, node: &Element, transform: &str) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property("transform", transform);
        }
    }

    fn scroll_top(&self, node: &Element) -> f64 {
        f64::from(node.scroll_top())
    }

    fn smooth_scroll_to(&self, node: &Element, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        node.scroll_to_with_scroll_to_options(&options);
    }

    fn start_timer(&self, delay: Duration, generation: u64) -> Timeout {
        let ui = self.ui.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || {
            let Some(ui) = ui.upgrade() else {
                return;
            };
            match ui.try_borrow_mut() {
                Ok(mut ui) => ui.settle(generation),
                Err(_) => debug!(generation, "controller busy, settle dropped"),
            };
        })
    }
}
