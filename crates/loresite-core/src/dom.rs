//! Document access used by the mobile controller
//!
//! The controller never touches a browser API directly. Everything it reads
//! or writes goes through [`Dom`], implemented by the wasm front end over
//! `web-sys` and by [`crate::memory::MemoryDom`] for headless use.

use std::time::Duration;

/// Viewport size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Mobile means at or below the breakpoint.
    pub fn is_mobile(&self, breakpoint: u32) -> bool {
        self.width <= f64::from(breakpoint)
    }
}

/// Element lookup and mutation over a live document.
///
/// Selectors are plain CSS selectors as stored in [`crate::UiConfig`].
/// Lookups return `None`/empty when nothing matches; mutations on a node that
/// cannot take them (e.g. an image source on a `div`) are silently ignored.
pub trait Dom {
    /// Handle to an element; equality is element identity
    type Node: Clone + PartialEq;

    /// Pending timer; dropping it cancels the timer
    type Timer;

    fn viewport(&self) -> Viewport;

    /// First match in document order, searching under `scope` or the whole document
    fn query(&self, scope: Option<&Self::Node>, selector: &str) -> Option<Self::Node>;

    /// All matches in document order
    fn query_all(&self, scope: Option<&Self::Node>, selector: &str) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn toggle_class(&self, node: &Self::Node, class: &str);

    fn set_class(&self, node: &Self::Node, class: &str, on: bool);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn set_text(&self, node: &Self::Node, text: &str);

    fn image_source(&self, node: &Self::Node) -> Option<String>;

    fn set_image_source(&self, node: &Self::Node, src: &str);

    /// Inline `transform` style
    fn set_transform(&self, node: &Self::Node, transform: &str);

    fn scroll_top(&self, node: &Self::Node) -> f64;

    fn smooth_scroll_to(&self, node: &Self::Node, top: f64);

    /// Schedule a settle callback carrying `generation` after `delay`.
    fn start_timer(&self, delay: Duration, generation: u64) -> Self::Timer;
}
