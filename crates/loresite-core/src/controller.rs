//! Mobile UI controller
//!
//! Built once per page load over an injected [`Dom`]. On a desktop viewport
//! it holds nothing and plans no listeners. On mobile it locates the anchors
//! of each feature, skipping any feature whose anchors are missing, and
//! publishes a listener plan:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ MobileUi::mount(dom, config)                               │
//! │  ├── width > breakpoint ──▶ inert, empty plan              │
//! │  ├── MenuToggle   button + overlay        click            │
//! │  ├── PopupView    cards, thumbnails,      click            │
//! │  │                overlays, content                        │
//! │  └── SlideView    container               scroll, touch    │
//! │                   indicators              click            │
//! │                   document                keydown          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host attaches exactly the planned listeners and feeds each event back
//! through [`MobileUi::dispatch`] with the listener's [`Binding`]. Bindings
//! that are bubbling boundaries report [`Propagation::Stop`]; the host must
//! stop the event there so ancestor dismiss handlers never see it.

use tracing::{debug, info, trace};

use crate::config::UiConfig;
use crate::dom::Dom;
use crate::menu::MenuToggle;
use crate::popup::{PopupStack, PopupView};
use crate::slides::{NavKey, SlideView};

/// DOM event types the controller listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
    TouchStart,
    TouchEnd,
    KeyDown,
}

impl EventKind {
    /// DOM event name
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Scroll => "scroll",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchEnd => "touchend",
            EventKind::KeyDown => "keydown",
        }
    }
}

/// Whether an event may continue to ancestor handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Bubble,
    Stop,
}

/// What a planned listener is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    MenuButton,
    Card(usize),
    DetailOverlay,
    DetailContent,
    Thumbnail(usize),
    ImageOverlay,
    Slides,
    Indicator(usize),
    SwipeStart,
    SwipeEnd,
    Keyboard,
}

impl Binding {
    /// Content and thumbnails sit inside the detail overlay and must not
    /// reach its dismiss handler.
    pub fn propagation(&self) -> Propagation {
        match self {
            Binding::DetailContent | Binding::Thumbnail(_) => Propagation::Stop,
            _ => Propagation::Bubble,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListenTarget<N> {
    Node(N),
    Document,
}

/// One listener the host must attach
#[derive(Debug, Clone, PartialEq)]
pub struct Listener<N> {
    pub target: ListenTarget<N>,
    pub kind: EventKind,
    pub binding: Binding,
    /// Listener never cancels the default action
    pub passive: bool,
}

impl<N> Listener<N> {
    fn on(node: N, kind: EventKind, binding: Binding) -> Self {
        Self {
            target: ListenTarget::Node(node),
            kind,
            binding,
            passive: matches!(
                kind,
                EventKind::Scroll | EventKind::TouchStart | EventKind::TouchEnd
            ),
        }
    }
}

/// Event payload handed to [`MobileUi::dispatch`]
#[derive(Debug, Clone, PartialEq)]
pub enum Input<N> {
    /// `target` is the element the click originated on
    Click { target: Option<N> },
    Scroll,
    /// Screen Y of the first changed touch
    Touch { screen_y: f64 },
    /// `KeyboardEvent.key`
    Key(String),
}

/// What the host should do with the event afterwards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    pub prevent_default: bool,
}

/// Per-page mobile behavior: menu, popups, slide viewer
pub struct MobileUi<D: Dom> {
    dom: D,
    config: UiConfig,
    menu: Option<MenuToggle<D::Node>>,
    popup: Option<PopupView<D::Node>>,
    slides: Option<SlideView<D>>,
    touch_start: Option<f64>,
    listeners: Vec<Listener<D::Node>>,
    mounted: bool,
}

impl<D: Dom> MobileUi<D> {
    /// Locate anchors and plan listeners. Inert on a desktop viewport.
    ///
    /// The viewport is read once here; later resizes are not observed.
    pub fn mount(dom: D, config: UiConfig) -> Self {
        let viewport = dom.viewport();
        let mut ui = Self {
            dom,
            config,
            menu: None,
            popup: None,
            slides: None,
            touch_start: None,
            listeners: Vec::new(),
            mounted: false,
        };

        if !viewport.is_mobile(ui.config.breakpoint) {
            info!(
                width = viewport.width,
                breakpoint = ui.config.breakpoint,
                "desktop viewport, mobile UI stays inert"
            );
            return ui;
        }

        ui.mounted = true;
        ui.menu = MenuToggle::locate(&ui.dom, &ui.config);
        ui.popup = PopupView::locate(&ui.dom, &ui.config);
        ui.slides = SlideView::locate(&ui.dom, &ui.config);
        ui.listeners = ui.plan();

        if let Some(slides) = &ui.slides {
            slides.refresh_indicators(&ui.dom, &ui.config);
        }

        info!(
            menu = ui.menu.is_some(),
            popup = ui.popup.is_some(),
            slides = ui.slides.is_some(),
            listeners = ui.listeners.len(),
            "mobile UI mounted"
        );
        ui
    }

    fn plan(&self) -> Vec<Listener<D::Node>> {
        let mut plan = Vec::new();

        if let Some(menu) = &self.menu {
            plan.push(Listener::on(menu.button.clone(), EventKind::Click, Binding::MenuButton));
        }

        if let Some(popup) = &self.popup {
            for (index, card) in popup.cards.iter().enumerate() {
                plan.push(Listener::on(card.clone(), EventKind::Click, Binding::Card(index)));
            }
            if let Some(image) = &popup.image {
                for (index, thumb) in popup.thumbnails.iter().enumerate() {
                    plan.push(Listener::on(
                        thumb.clone(),
                        EventKind::Click,
                        Binding::Thumbnail(index),
                    ));
                }
                plan.push(Listener::on(
                    image.overlay.clone(),
                    EventKind::Click,
                    Binding::ImageOverlay,
                ));
            }
            plan.push(Listener::on(
                popup.overlay.clone(),
                EventKind::Click,
                Binding::DetailOverlay,
            ));
            if let Some(content) = &popup.content {
                plan.push(Listener::on(
                    content.clone(),
                    EventKind::Click,
                    Binding::DetailContent,
                ));
            }
        }

        if let Some(slides) = &self.slides {
            plan.push(Listener::on(slides.container.clone(), EventKind::Scroll, Binding::Slides));
            for (index, indicator) in slides.indicators.iter().enumerate() {
                plan.push(Listener::on(
                    indicator.clone(),
                    EventKind::Click,
                    Binding::Indicator(index),
                ));
            }
            plan.push(Listener::on(
                slides.container.clone(),
                EventKind::TouchStart,
                Binding::SwipeStart,
            ));
            plan.push(Listener::on(
                slides.container.clone(),
                EventKind::TouchEnd,
                Binding::SwipeEnd,
            ));
            plan.push(Listener {
                target: ListenTarget::Document,
                kind: EventKind::KeyDown,
                binding: Binding::Keyboard,
                passive: false,
            });
        }

        plan
    }

    /// Listeners the host must attach; empty on desktop.
    pub fn listeners(&self) -> &[Listener<D::Node>] {
        &self.listeners
    }

    /// Whether the viewport passed the breakpoint check
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn popup(&self) -> Option<&PopupStack> {
        self.popup.as_ref().map(|popup| &popup.stack)
    }

    pub fn current_slide(&self) -> Option<usize> {
        self.slides.as_ref().map(|slides| slides.viewer.current())
    }

    pub fn slide_count(&self) -> Option<usize> {
        self.slides.as_ref().map(|slides| slides.viewer.count())
    }

    /// Handle one event delivered to the listener planned with `binding`.
    pub fn dispatch(&mut self, binding: Binding, input: Input<D::Node>) -> Response {
        let mut response = Response::default();

        match (binding, input) {
            (Binding::MenuButton, Input::Click { .. }) => {
                if let Some(menu) = &self.menu {
                    menu.toggle(&self.dom, &self.config);
                }
            }
            (Binding::Card(index), Input::Click { .. }) => {
                if let Some(popup) = &mut self.popup {
                    popup.open_card(&self.dom, &self.config, index);
                }
            }
            (Binding::DetailOverlay, Input::Click { target }) => {
                if let Some(popup) = &mut self.popup {
                    popup.overlay_clicked(&self.dom, &self.config, target.as_ref());
                }
            }
            (Binding::DetailContent, Input::Click { .. }) => {}
            (Binding::Thumbnail(index), Input::Click { .. }) => {
                if let Some(popup) = &mut self.popup {
                    popup.open_thumbnail(&self.dom, &self.config, index);
                }
            }
            (Binding::ImageOverlay, Input::Click { target }) => {
                if let Some(popup) = &mut self.popup {
                    popup.image_overlay_clicked(&self.dom, &self.config, target.as_ref());
                }
            }
            (Binding::Slides, Input::Scroll) => {
                if let Some(slides) = &mut self.slides {
                    slides.scrolled(&self.dom, &self.config);
                }
            }
            (Binding::Indicator(index), Input::Click { .. }) => {
                self.go_to(index);
            }
            (Binding::SwipeStart, Input::Touch { screen_y }) => {
                self.touch_start = Some(screen_y);
            }
            (Binding::SwipeEnd, Input::Touch { screen_y }) => {
                let start = self.touch_start.take();
                if let (Some(start), Some(slides)) = (start, &mut self.slides) {
                    if let Some(index) =
                        slides
                            .viewer
                            .swipe(start, screen_y, self.config.swipe_threshold)
                    {
                        debug!(index, "swiped to slide");
                        slides.show(&self.dom, &self.config, index);
                    }
                }
            }
            (Binding::Keyboard, Input::Key(key)) => {
                if let (Some(nav), Some(slides)) = (NavKey::from_key(&key), &mut self.slides) {
                    response.prevent_default = true;
                    if let Some(index) = slides.viewer.key(nav) {
                        debug!(index, key = %key, "keyboard moved to slide");
                        slides.show(&self.dom, &self.config, index);
                    }
                }
            }
            (binding, _) => {
                trace!(?binding, "input does not apply to binding");
            }
        }

        response
    }

    /// Jump to slide `index`; out-of-range requests are ignored.
    pub fn go_to(&mut self, index: usize) {
        if let Some(slides) = &mut self.slides {
            if let Some(index) = slides.viewer.go_to(index) {
                slides.show(&self.dom, &self.config, index);
            }
        }
    }

    /// Settle timer carrying `generation` has fired.
    pub fn settle(&mut self, generation: u64) {
        if let Some(slides) = &mut self.slides {
            slides.settled(&self.dom, &self.config, generation);
        }
    }
}
