//! Lore Site Core Library
//!
//! Header rendering and mobile interaction logic for the lore site, kept
//! free of any browser API so it runs the same in wasm, on the CLI and in
//! tests.
//!
//! ## Overview
//!
//! - **Header**: every page inserts the same navigation header at parse time,
//!   with the entry for the current page highlighted.
//! - **Mobile UI**: on viewports up to 768px wide, a controller wires the
//!   hamburger menu, a two-level detail/image popup and a full-screen slide
//!   viewer (scroll-synced indicators, swipe, keyboard, parallax).
//!
//! ## Quick Start
//!
//! ```
//! use loresite_core::{render_header, ActivePage};
//!
//! let html = render_header(ActivePage::Job);
//! assert!(html.contains("nav-item job active"));
//! ```
//!
//! ```
//! use loresite_core::memory::MemoryDom;
//! use loresite_core::{MobileUi, UiConfig, Viewport};
//!
//! // Desktop viewports get no behavior at all
//! let dom = MemoryDom::new(Viewport::new(1280.0, 800.0));
//! let ui = MobileUi::mount(dom, UiConfig::default());
//! assert!(ui.listeners().is_empty());
//! ```

pub mod card;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod header;
pub mod memory;
mod menu;
pub mod page;
pub mod popup;
pub mod slides;
pub mod timer;

// Re-exports
pub use card::CardRecord;
pub use config::{Selectors, UiConfig, MOBILE_BREAKPOINT};
pub use controller::{
    Binding, EventKind, Input, ListenTarget, Listener, MobileUi, Propagation, Response,
};
pub use dom::{Dom, Viewport};
pub use error::{SiteError, SiteResult};
pub use header::{inject_header, render_header, HeaderTemplate, NavEntry, HEADER_PLACEHOLDER};
pub use page::ActivePage;
pub use popup::{PopupLevel, PopupStack};
pub use slides::{NavKey, SlideViewer};
pub use timer::SettleTimer;
