//! Lore Site - browser front end
//!
//! Compiled to wasm and loaded by every page of the site. It exposes two
//! entry points:
//!
//! - `renderHeader(page)`: called from an inline script where the header
//!   belongs; inserts the navigation header right there.
//! - `start`: runs when the module loads and mounts the mobile controller
//!   once the document is parsed.
//!
//! All behavior lives in `loresite-core`; this crate only adapts it to
//! `web-sys` and `gloo`.

mod dom;
pub mod logging;
mod mount;

use std::cell::RefCell;

use gloo::events::EventListener;
use loresite_core::{render_header, ActivePage};
use tracing::debug;
use wasm_bindgen::prelude::*;

pub use dom::WebDom;
pub use mount::{mount, MountedUi, CONFIG_ELEMENT_ID};

thread_local! {
    /// Controller for the current page; lives until navigation.
    static MOBILE_UI: RefCell<Option<MountedUi>> = const { RefCell::new(None) };
}

/// Insert the navigation header for `active_page`.
///
/// Placed immediately before the calling `<script>` when one is executing.
/// wasm modules initialise asynchronously, so by the time this runs the
/// document has usually been parsed and `currentScript` is null; the header
/// then goes to the top of `<body>`. For placement at parse time, render it
/// into the page ahead of time with `loresite inject`.
#[wasm_bindgen(js_name = renderHeader)]
pub fn render_header_here(active_page: &str) {
    let html = render_header(ActivePage::from_tag(active_page));
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    let inserted = match document.current_script() {
        Some(script) => script.insert_adjacent_html("beforebegin", &html),
        None => match document.body() {
            Some(body) => body.insert_adjacent_html("afterbegin", &html),
            None => return,
        },
    };
    if inserted.is_err() {
        debug!(active_page, "header insertion failed");
    }
}

/// Module entry point: mount the mobile controller once the DOM is ready.
#[wasm_bindgen(start)]
pub fn start() {
    logging::init();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    if is_loading(&document.ready_state()) {
        EventListener::once(&document, "DOMContentLoaded", |_| boot()).forget();
    } else {
        boot();
    }
}

/// `document.readyState` before the DOM has been parsed
fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn boot() {
    let mounted = mount();
    MOBILE_UI.with(|slot| *slot.borrow_mut() = mounted);
}
