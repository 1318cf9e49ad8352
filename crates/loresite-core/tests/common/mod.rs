//! Shared page fixture for controller tests

#![allow(dead_code)]

use loresite_core::memory::{MemoryDom, NodeId};
use loresite_core::{MobileUi, UiConfig, Viewport};

pub const VIEWPORT_HEIGHT: f64 = 800.0;

/// Route controller logs to the test output (ok if already initialized).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("loresite_core=debug")
        .with_test_writer()
        .try_init()
        .ok();
}

/// Which parts of the mobile markup a fixture page carries
#[derive(Debug, Clone, Copy)]
pub struct Features {
    pub menu: bool,
    pub popup: bool,
    pub image_popup: bool,
    pub slides: Option<usize>,
}

impl Features {
    pub fn all(slides: usize) -> Self {
        Self {
            menu: true,
            popup: true,
            image_popup: true,
            slides: Some(slides),
        }
    }
}

/// Every anchor of a built page
pub struct Page {
    pub dom: MemoryDom,
    pub menu_button: Option<NodeId>,
    pub nav: Option<NodeId>,
    pub cards: Vec<NodeId>,
    pub popup: Option<NodeId>,
    pub content: Option<NodeId>,
    pub name: Option<NodeId>,
    pub info: Option<NodeId>,
    pub desc: Option<NodeId>,
    pub thumbnails: Vec<NodeId>,
    pub image_popup: Option<NodeId>,
    pub large_image: Option<NodeId>,
    pub container: Option<NodeId>,
    pub slides: Vec<NodeId>,
    pub backgrounds: Vec<NodeId>,
    pub indicators: Vec<NodeId>,
}

impl Page {
    pub fn build(width: f64, features: Features) -> Self {
        let dom = MemoryDom::new(Viewport::new(width, VIEWPORT_HEIGHT));
        let body = dom.append(None, "body");

        let (menu_button, nav) = if features.menu {
            (
                Some(dom.append(Some(body), "button#mobile-menu-btn")),
                Some(dom.append(Some(body), "nav#mobile-nav")),
            )
        } else {
            (None, None)
        };

        let grid = dom.append(Some(body), "section.grid");
        let cards: Vec<NodeId> = [
            (".party-card", "Alice", "Mage", "A wizard"),
            (".party-card", "Bram", "Knight", "Holds the line"),
            (".figure-card", "Cato", "Regent", "Rules the north"),
        ]
        .into_iter()
        .map(|(spec, name, info, desc)| {
            let card = dom.append(Some(grid), spec);
            dom.set_attribute(card, "data-name", name);
            dom.set_attribute(card, "data-info", info);
            dom.set_attribute(card, "data-desc", desc);
            card
        })
        .collect();

        let mut page = Page {
            dom: dom.clone(),
            menu_button,
            nav,
            cards,
            popup: None,
            content: None,
            name: None,
            info: None,
            desc: None,
            thumbnails: Vec::new(),
            image_popup: None,
            large_image: None,
            container: None,
            slides: Vec::new(),
            backgrounds: Vec::new(),
            indicators: Vec::new(),
        };

        if features.popup {
            let popup = dom.append(Some(body), "#mobile-popup");
            let content = dom.append(Some(popup), ".popup-content-mobile");
            page.name = Some(dom.append(Some(content), "h2.popup-name-mobile"));
            page.info = Some(dom.append(Some(content), "p.popup-info-mobile"));
            page.desc = Some(dom.append(Some(content), "p.popup-desc-mobile"));
            let gallery = dom.append(Some(content), ".popup-gallery");
            for src in ["img/alice-1.png", "img/alice-2.png"] {
                let thumb = dom.append(Some(gallery), "img.popup-gallery-img-mobile");
                dom.set_attribute(thumb, "src", src);
                page.thumbnails.push(thumb);
            }
            page.popup = Some(popup);
            page.content = Some(content);
        }

        if features.image_popup {
            let overlay = dom.append(Some(body), "#mobile-image-popup");
            page.large_image = Some(dom.append(Some(overlay), "img#mobile-large-img"));
            page.image_popup = Some(overlay);
        }

        if let Some(count) = features.slides {
            let container = dom.append(Some(body), ".slides-container");
            for _ in 0..count {
                let slide = dom.append(Some(container), "section.slide");
                page.backgrounds.push(dom.append(Some(slide), ".slide-bg"));
                page.slides.push(slide);
            }
            let strip = dom.append(Some(body), ".indicators");
            for _ in 0..count {
                page.indicators.push(dom.append(Some(strip), "button.indicator"));
            }
            page.container = Some(container);
        }

        page
    }

    pub fn mobile() -> Self {
        Self::build(375.0, Features::all(4))
    }

    pub fn mount(&self) -> MobileUi<MemoryDom> {
        init_tracing();
        MobileUi::mount(self.dom.clone(), UiConfig::default())
    }

    pub fn active_indicators(&self) -> Vec<usize> {
        use loresite_core::Dom;
        self.indicators
            .iter()
            .enumerate()
            .filter(|(_, node)| self.dom.has_class(node, "active"))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_active(&self, node: Option<NodeId>) -> bool {
        use loresite_core::Dom;
        node.map_or(false, |node| self.dom.has_class(&node, "active"))
    }
}
