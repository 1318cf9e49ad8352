//! Full-screen slide viewer
//!
//! Each slide is one viewport tall inside a vertically scrolling container.
//! The current index moves through four paths:
//!
//! - settled scroll: recomputed from the scroll offset once scrolling stops
//! - indicator click and keyboard: direct jump, container smooth-scrolls there
//! - swipe: vertical touch travel past the threshold steps one slide
//!
//! Next/previous stop at the ends, there is no wraparound.

use tracing::debug;

use crate::config::UiConfig;
use crate::dom::Dom;
use crate::timer::SettleTimer;

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Previous,
    First,
    Last,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "PageDown" => Some(NavKey::Next),
            "ArrowUp" | "PageUp" => Some(NavKey::Previous),
            "Home" => Some(NavKey::First),
            "End" => Some(NavKey::Last),
            _ => None,
        }
    }
}

/// Index state machine over `[0, count)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideViewer {
    current: usize,
    count: usize,
}

impl SlideViewer {
    pub fn new(count: usize) -> Self {
        Self { current: 0, count }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Nearest whole slide to `scroll_top`, clamped to the slide range.
    pub fn index_for_offset(&self, scroll_top: f64, viewport_height: f64) -> Option<usize> {
        let last = self.count.checked_sub(1)?;
        if viewport_height <= 0.0 || !scroll_top.is_finite() {
            return None;
        }
        let nearest = (scroll_top / viewport_height).round().max(0.0) as usize;
        Some(nearest.min(last))
    }

    /// Apply a settled scroll. Returns the new index when it changed.
    pub fn settle(&mut self, scroll_top: f64, viewport_height: f64) -> Option<usize> {
        let index = self.index_for_offset(scroll_top, viewport_height)?;
        if index == self.current {
            return None;
        }
        self.current = index;
        Some(index)
    }

    /// Jump to `index`. Out-of-range requests are ignored.
    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        if index >= self.count {
            return None;
        }
        self.current = index;
        Some(index)
    }

    pub fn next(&mut self) -> Option<usize> {
        if self.current + 1 < self.count {
            self.go_to(self.current + 1)
        } else {
            None
        }
    }

    pub fn previous(&mut self) -> Option<usize> {
        if self.current > 0 {
            self.go_to(self.current - 1)
        } else {
            None
        }
    }

    /// Vertical swipe from `start_y` to `end_y`. Upward travel advances.
    pub fn swipe(&mut self, start_y: f64, end_y: f64, threshold: f64) -> Option<usize> {
        let travel = start_y - end_y;
        if travel.abs() <= threshold {
            return None;
        }
        if travel > 0.0 {
            self.next()
        } else {
            self.previous()
        }
    }

    pub fn key(&mut self, key: NavKey) -> Option<usize> {
        match key {
            NavKey::Next => self.next(),
            NavKey::Previous => self.previous(),
            NavKey::First => self.go_to(0),
            NavKey::Last => self.go_to(self.count.checked_sub(1)?),
        }
    }
}

/// Background offset for the slide at `index`.
pub fn parallax_offset(scroll_top: f64, index: usize, viewport_height: f64, speed: f64) -> f64 {
    (scroll_top - index as f64 * viewport_height) * speed
}

/// CSS transform for a background offset
pub fn translate_y(offset: f64) -> String {
    format!("translateY({}px)", offset)
}

/// DOM anchors of the slide viewer plus its state
pub(crate) struct SlideView<D: Dom> {
    pub container: D::Node,
    pub backgrounds: Vec<Option<D::Node>>,
    pub indicators: Vec<D::Node>,
    pub viewer: SlideViewer,
    pub settle: SettleTimer<D::Timer>,
}

impl<D: Dom> SlideView<D> {
    /// Look up anchors. `None` when the page has no slide container.
    pub fn locate(dom: &D, config: &UiConfig) -> Option<Self> {
        let selectors = &config.selectors;
        let Some(container) = dom.query(None, &selectors.slides_container) else {
            debug!(selector = %selectors.slides_container, "no slide container, viewer disabled");
            return None;
        };

        let slides = dom.query_all(None, &selectors.slide);
        let backgrounds = slides
            .iter()
            .map(|slide| dom.query(Some(slide), &selectors.slide_background))
            .collect();
        let indicators = dom.query_all(None, &selectors.indicator);
        debug!(slides = slides.len(), indicators = indicators.len(), "slide viewer ready");

        Some(Self {
            container,
            backgrounds,
            indicators,
            viewer: SlideViewer::new(slides.len()),
            settle: SettleTimer::new(config.settle_window()),
        })
    }

    /// Raw scroll tick: move backgrounds now, recompute the index once scrolling settles.
    pub fn scrolled(&mut self, dom: &D, config: &UiConfig) {
        let scroll_top = dom.scroll_top(&self.container);
        let height = dom.viewport().height;
        for (index, background) in self.backgrounds.iter().enumerate() {
            if let Some(background) = background {
                let offset = parallax_offset(scroll_top, index, height, config.parallax_speed);
                dom.set_transform(background, &translate_y(offset));
            }
        }

        self.settle
            .rearm(|delay, generation| dom.start_timer(delay, generation));
    }

    pub fn settled(&mut self, dom: &D, config: &UiConfig, generation: u64) {
        if !self.settle.fire(generation) {
            return;
        }
        let scroll_top = dom.scroll_top(&self.container);
        if let Some(index) = self.viewer.settle(scroll_top, dom.viewport().height) {
            debug!(index, scroll_top, "scroll settled on new slide");
            self.refresh_indicators(dom, config);
        }
    }

    /// Scroll to `index` and highlight its indicator.
    pub fn show(&mut self, dom: &D, config: &UiConfig, index: usize) {
        let target = index as f64 * dom.viewport().height;
        dom.smooth_scroll_to(&self.container, target);
        self.refresh_indicators(dom, config);
    }

    pub fn refresh_indicators(&self, dom: &D, config: &UiConfig) {
        let current = self.viewer.current();
        for (index, indicator) in self.indicators.iter().enumerate() {
            dom.set_class(indicator, &config.active_class, index == current);
        }
    }
}
