//! Attaching the controller's listener plan to the live document

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use loresite_core::{EventKind, Input, ListenTarget, Listener, MobileUi, Propagation, UiConfig};
use tracing::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent, TouchEvent};

use crate::dom::WebDom;

/// Element holding an optional JSON override of [`UiConfig`]
pub const CONFIG_ELEMENT_ID: &str = "loresite-config";

type SharedUi = Rc<RefCell<MobileUi<WebDom>>>;

/// A mounted controller and the listeners keeping it reachable.
///
/// Dropping it detaches every listener and cancels a pending settle timer.
pub struct MountedUi {
    _ui: SharedUi,
    _listeners: Vec<EventListener>,
}

/// Build the controller over the current document and attach its plan.
///
/// Returns `None` outside a browser.
pub fn mount() -> Option<MountedUi> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let config = page_config(&document);

    let ui: SharedUi = Rc::new_cyclic(|weak: &Weak<RefCell<MobileUi<WebDom>>>| {
        RefCell::new(MobileUi::mount(
            WebDom::new(window.clone(), document.clone(), weak.clone()),
            config,
        ))
    });

    let plan = ui.borrow().listeners().to_vec();
    let listeners = plan
        .into_iter()
        .map(|listener| attach(&document, &ui, listener))
        .collect::<Vec<_>>();

    info!(listeners = listeners.len(), "listeners attached");
    Some(MountedUi {
        _ui: ui,
        _listeners: listeners,
    })
}

/// Read the page's config override, falling back to defaults.
fn page_config(document: &Document) -> UiConfig {
    document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .map(|json| UiConfig::from_json_or_default(&json))
        .unwrap_or_default()
}

fn attach(document: &Document, ui: &SharedUi, listener: Listener<Element>) -> EventListener {
    let options = if listener.passive {
        EventListenerOptions::default()
    } else {
        EventListenerOptions::enable_prevent_default()
    };
    let weak = Rc::downgrade(ui);
    let binding = listener.binding;
    let kind = listener.kind;

    let callback = move |event: &Event| {
        let Some(ui) = weak.upgrade() else {
            return;
        };
        let Some(input) = read_input(kind, event) else {
            return;
        };
        if binding.propagation() == Propagation::Stop {
            event.stop_propagation();
        }
        let Ok(mut ui) = ui.try_borrow_mut() else {
            debug!(?binding, "controller busy, event dropped");
            return;
        };
        if ui.dispatch(binding, input).prevent_default {
            event.prevent_default();
        }
    };

    match &listener.target {
        ListenTarget::Node(element) => {
            EventListener::new_with_options(element, kind.name(), options, callback)
        }
        ListenTarget::Document => {
            EventListener::new_with_options(document, kind.name(), options, callback)
        }
    }
}

fn read_input(kind: EventKind, event: &Event) -> Option<Input<Element>> {
    match kind {
        EventKind::Click => Some(Input::Click {
            target: event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok()),
        }),
        EventKind::Scroll => Some(Input::Scroll),
        EventKind::TouchStart | EventKind::TouchEnd => {
            let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
            Some(Input::Touch {
                screen_y: f64::from(touch.screen_y()),
            })
        }
        EventKind::KeyDown => Some(Input::Key(event.dyn_ref::<KeyboardEvent>()?.key())),
    }
}
