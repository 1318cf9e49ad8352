//! Hamburger menu toggle

use tracing::debug;

use crate::config::UiConfig;
use crate::dom::Dom;

#[derive(Debug, Clone)]
pub(crate) struct MenuToggle<N> {
    pub button: N,
    pub overlay: N,
}

impl<N: Clone> MenuToggle<N> {
    /// Both the button and the overlay must exist.
    pub fn locate<D: Dom<Node = N>>(dom: &D, config: &UiConfig) -> Option<Self> {
        let selectors = &config.selectors;
        match (
            dom.query(None, &selectors.menu_button),
            dom.query(None, &selectors.nav_overlay),
        ) {
            (Some(button), Some(overlay)) => Some(Self { button, overlay }),
            _ => {
                debug!("menu button or nav overlay missing, menu disabled");
                None
            }
        }
    }

    pub fn toggle<D: Dom<Node = N>>(&self, dom: &D, config: &UiConfig) {
        dom.toggle_class(&self.button, &config.active_class);
        dom.toggle_class(&self.overlay, &config.active_class);
    }
}
