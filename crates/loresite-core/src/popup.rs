//! Detail popup and its nested image popup
//!
//! ```text
//! Closed ──open_detail──▶ Detail ──open_image──▶ Image
//!   ▲                      │  ▲                    │
//!   └────close_detail──────┘  └────close_image─────┘
//!   ▲                                              │
//!   └──────────────close_detail (cascade)──────────┘
//! ```
//!
//! The image level only exists on top of the detail level. Closing the
//! detail level always closes the image level with it.

use tracing::debug;

use crate::card::CardRecord;
use crate::config::UiConfig;
use crate::dom::Dom;

/// How many overlay levels are showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupLevel {
    #[default]
    Closed,
    Detail,
    Image,
}

/// Two-level overlay stack
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupStack {
    level: PopupLevel,
    card: Option<CardRecord>,
    image: Option<String>,
}

impl PopupStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> PopupLevel {
        self.level
    }

    pub fn is_detail_open(&self) -> bool {
        self.level != PopupLevel::Closed
    }

    pub fn is_image_open(&self) -> bool {
        self.level == PopupLevel::Image
    }

    /// Card most recently shown in the detail level
    pub fn card(&self) -> Option<&CardRecord> {
        self.card.as_ref()
    }

    /// Source most recently shown in the image level
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Show `card`, replacing whatever the detail level held.
    ///
    /// An open image level stays open.
    pub fn open_detail(&mut self, card: CardRecord) {
        self.card = Some(card);
        if self.level == PopupLevel::Closed {
            self.level = PopupLevel::Detail;
        }
    }

    /// Close the detail level and anything stacked on it.
    pub fn close_detail(&mut self) {
        self.level = PopupLevel::Closed;
    }

    /// Open the image level. Refused unless the detail level is open.
    pub fn open_image(&mut self, src: impl Into<String>) -> bool {
        if !self.is_detail_open() {
            return false;
        }
        self.image = Some(src.into());
        self.level = PopupLevel::Image;
        true
    }

    pub fn close_image(&mut self) {
        if self.level == PopupLevel::Image {
            self.level = PopupLevel::Detail;
        }
    }
}

/// Image overlay plus the element that shows the enlarged picture
#[derive(Debug, Clone)]
pub(crate) struct ImageAnchors<N> {
    pub overlay: N,
    pub large: N,
}

/// DOM anchors of the popup system and the stack they render
#[derive(Debug)]
pub(crate) struct PopupView<N> {
    pub overlay: N,
    pub name: Option<N>,
    pub info: Option<N>,
    pub desc: Option<N>,
    pub content: Option<N>,
    pub thumbnails: Vec<N>,
    pub image: Option<ImageAnchors<N>>,
    pub cards: Vec<N>,
    pub stack: PopupStack,
}

impl<N: Clone + PartialEq> PopupView<N> {
    /// Look up anchors. `None` when the page has no detail popup.
    pub fn locate<D: Dom<Node = N>>(dom: &D, config: &UiConfig) -> Option<Self> {
        let selectors = &config.selectors;
        let Some(overlay) = dom.query(None, &selectors.popup) else {
            debug!(selector = %selectors.popup, "no detail popup, popups disabled");
            return None;
        };

        let image = match (
            dom.query(None, &selectors.image_popup),
            dom.query(None, &selectors.large_image),
        ) {
            (Some(overlay), Some(large)) => Some(ImageAnchors { overlay, large }),
            _ => {
                debug!("image popup incomplete, thumbnails stay inert");
                None
            }
        };

        let view = Self {
            name: dom.query(Some(&overlay), &selectors.popup_name),
            info: dom.query(Some(&overlay), &selectors.popup_info),
            desc: dom.query(Some(&overlay), &selectors.popup_desc),
            content: dom.query(Some(&overlay), &selectors.popup_content),
            thumbnails: dom.query_all(Some(&overlay), &selectors.gallery_images),
            cards: dom.query_all(None, &selectors.cards),
            image,
            overlay,
            stack: PopupStack::new(),
        };
        debug!(
            cards = view.cards.len(),
            thumbnails = view.thumbnails.len(),
            "popup system ready"
        );
        Some(view)
    }

    pub fn open_card<D: Dom<Node = N>>(&mut self, dom: &D, config: &UiConfig, index: usize) {
        let Some(card_node) = self.cards.get(index) else {
            return;
        };
        let card = CardRecord::from_attributes(|name| dom.attribute(card_node, name));

        if let Some(node) = &self.name {
            dom.set_text(node, &card.name);
        }
        if let Some(node) = &self.info {
            dom.set_text(node, &card.info);
        }
        if let Some(node) = &self.desc {
            dom.set_text(node, &card.description);
        }

        debug!(name = %card.name, "opening detail popup");
        self.stack.open_detail(card);
        self.render(dom, config);
    }

    /// Click landed on the detail overlay; only a click on the backdrop itself closes it.
    pub fn overlay_clicked<D: Dom<Node = N>>(&mut self, dom: &D, config: &UiConfig, target: Option<&N>) {
        if target == Some(&self.overlay) {
            self.stack.close_detail();
            self.render(dom, config);
        }
    }

    pub fn open_thumbnail<D: Dom<Node = N>>(&mut self, dom: &D, config: &UiConfig, index: usize) {
        let (Some(image), Some(thumb)) = (&self.image, self.thumbnails.get(index)) else {
            return;
        };
        let src = dom.image_source(thumb).unwrap_or_default();
        if !self.stack.open_image(src) {
            debug!(index, "detail popup closed, thumbnail ignored");
            return;
        }
        if let Some(src) = self.stack.image() {
            dom.set_image_source(&image.large, src);
        }
        self.render(dom, config);
    }

    /// Click landed on the image overlay; the backdrop or the picture itself closes it.
    pub fn image_overlay_clicked<D: Dom<Node = N>>(
        &mut self,
        dom: &D,
        config: &UiConfig,
        target: Option<&N>,
    ) {
        let Some(image) = &self.image else {
            return;
        };
        if target == Some(&image.overlay) || target == Some(&image.large) {
            self.stack.close_image();
            self.render(dom, config);
        }
    }

    /// Bring the overlay flags in line with the stack.
    fn render<D: Dom<Node = N>>(&self, dom: &D, config: &UiConfig) {
        dom.set_class(&self.overlay, &config.active_class, self.stack.is_detail_open());
        if let Some(image) = &self.image {
            dom.set_class(&image.overlay, &config.active_class, self.stack.is_image_open());
        }
    }
}
