//! Mobile UI scenario tests
//!
//! Drive the controller through the in-memory document the way a browser
//! would: bubbling clicks, scroll events, touches, key presses and a manual
//! clock for the settle timer.

mod common;

use common::{Features, Page, VIEWPORT_HEIGHT};
use loresite_core::{Binding, Dom, EventKind, Input, ListenTarget, PopupLevel};

// ============================================================================
// Gating
// ============================================================================

#[test]
fn test_desktop_viewport_stays_inert() {
    for width in [769.0, 1024.0, 1920.0] {
        let page = Page::build(width, Features::all(4));
        let mut ui = page.mount();

        assert!(!ui.is_mounted());
        assert!(ui.listeners().is_empty());
        assert_eq!(ui.current_slide(), None);

        ui.click(page.menu_button.unwrap());
        assert!(!page.is_active(page.nav));
        assert!(page.active_indicators().is_empty());
    }
}

#[test]
fn test_breakpoint_width_is_mobile() {
    let page = Page::build(768.0, Features::all(4));
    let ui = page.mount();
    assert!(ui.is_mounted());
    assert!(!ui.listeners().is_empty());
}

#[test]
fn test_page_without_anchors_mounts_without_listeners() {
    let page = Page::build(
        375.0,
        Features {
            menu: false,
            popup: false,
            image_popup: false,
            slides: None,
        },
    );
    let mut ui = page.mount();

    assert!(ui.is_mounted());
    assert!(ui.listeners().is_empty());
    assert!(ui.popup().is_none());
    assert!(!ui.press("End").prevent_default);
}

#[test]
fn test_listener_plan_covers_every_anchor() {
    let page = Page::mobile();
    let ui = page.mount();
    let plan = ui.listeners();

    let count = |binding: fn(&Binding) -> bool| plan.iter().filter(|l| binding(&l.binding)).count();
    assert_eq!(count(|b| *b == Binding::MenuButton), 1);
    assert_eq!(count(|b| matches!(b, Binding::Card(_))), 3);
    assert_eq!(count(|b| matches!(b, Binding::Thumbnail(_))), 2);
    assert_eq!(count(|b| matches!(b, Binding::Indicator(_))), 4);

    let keyboard = plan.iter().find(|l| l.binding == Binding::Keyboard).unwrap();
    assert_eq!(keyboard.target, ListenTarget::Document);
    assert_eq!(keyboard.kind, EventKind::KeyDown);
    assert!(!keyboard.passive);

    let scroll = plan.iter().find(|l| l.binding == Binding::Slides).unwrap();
    assert_eq!(scroll.kind, EventKind::Scroll);
    assert!(scroll.passive);
}

// ============================================================================
// Menu
// ============================================================================

#[test]
fn test_menu_toggles_button_and_overlay_together() {
    let page = Page::mobile();
    let mut ui = page.mount();
    let button = page.menu_button.unwrap();

    ui.click(button);
    assert!(page.is_active(page.menu_button));
    assert!(page.is_active(page.nav));

    ui.click(button);
    assert!(!page.is_active(page.menu_button));
    assert!(!page.is_active(page.nav));
}

#[test]
fn test_menu_needs_both_anchors() {
    let page = Page::mobile();
    let mut ui = page.mount();
    assert!(ui.listeners().iter().any(|l| l.binding == Binding::MenuButton));

    let page = Page::build(
        375.0,
        Features {
            menu: false,
            ..Features::all(2)
        },
    );
    ui = page.mount();
    assert!(!ui.listeners().iter().any(|l| l.binding == Binding::MenuButton));
}

// ============================================================================
// Popups
// ============================================================================

#[test]
fn test_card_fills_detail_popup() {
    let page = Page::mobile();
    let mut ui = page.mount();

    ui.click(page.cards[0]);

    assert_eq!(page.dom.text(page.name.unwrap()), "Alice");
    assert_eq!(page.dom.text(page.info.unwrap()), "Mage");
    assert_eq!(page.dom.text(page.desc.unwrap()), "A wizard");
    assert!(page.is_active(page.popup));
    assert_eq!(ui.popup().unwrap().level(), PopupLevel::Detail);
}

#[test]
fn test_next_card_overwrites_open_popup() {
    let page = Page::mobile();
    let mut ui = page.mount();

    ui.click(page.cards[0]);
    ui.click(page.cards[2]);

    assert_eq!(page.dom.text(page.name.unwrap()), "Cato");
    assert_eq!(page.dom.text(page.desc.unwrap()), "Rules the north");
    assert!(page.is_active(page.popup));
    assert_eq!(ui.popup().unwrap().card().unwrap().info, "Regent");
}

#[test]
fn test_content_click_keeps_popup_open() {
    let page = Page::mobile();
    let mut ui = page.mount();
    ui.click(page.cards[1]);

    ui.click(page.desc.unwrap());
    ui.click(page.content.unwrap());
    assert!(page.is_active(page.popup));

    ui.click(page.popup.unwrap());
    assert!(!page.is_active(page.popup));
    assert_eq!(ui.popup().unwrap().level(), PopupLevel::Closed);
}

#[test]
fn test_thumbnail_opens_image_without_closing_detail() {
    let page = Page::mobile();
    let mut ui = page.mount();
    ui.click(page.cards[0]);

    ui.click(page.thumbnails[1]);

    assert!(page.is_active(page.image_popup));
    assert!(page.is_active(page.popup), "detail popup must stay open");
    assert_eq!(
        page.dom.image_source(&page.large_image.unwrap()).as_deref(),
        Some("img/alice-2.png")
    );
    assert_eq!(ui.popup().unwrap().level(), PopupLevel::Image);
}

#[test]
fn test_image_popup_closes_on_backdrop_or_picture() {
    let page = Page::mobile();
    let mut ui = page.mount();
    ui.click(page.cards[0]);

    ui.click(page.thumbnails[0]);
    ui.click(page.image_popup.unwrap());
    assert!(!page.is_active(page.image_popup));
    assert!(page.is_active(page.popup));

    ui.click(page.thumbnails[0]);
    ui.click(page.large_image.unwrap());
    assert!(!page.is_active(page.image_popup));
    assert_eq!(ui.popup().unwrap().level(), PopupLevel::Detail);
}

#[test]
fn test_thumbnail_with_detail_closed_leaves_image_untouched() {
    let page = Page::mobile();
    let mut ui = page.mount();

    ui.dispatch(Binding::Thumbnail(0), Input::Click { target: page.thumbnails.first().copied() });

    assert_eq!(ui.popup().unwrap().level(), PopupLevel::Closed);
    assert!(!page.is_active(page.image_popup));
    assert_eq!(page.dom.image_source(&page.large_image.unwrap()), None);
}

#[test]
fn test_closing_detail_closes_image_level() {
    let page = Page::mobile();
    let mut ui = page.mount();
    ui.click(page.cards[0]);
    ui.click(page.thumbnails[0]);

    ui.click(page.popup.unwrap());

    assert!(!page.is_active(page.popup));
    assert!(!page.is_active(page.image_popup));
    assert_eq!(ui.popup().unwrap().level(), PopupLevel::Closed);
}

#[test]
fn test_thumbnails_inert_without_image_popup() {
    let page = Page::build(
        375.0,
        Features {
            image_popup: false,
            ..Features::all(0)
        },
    );
    let mut ui = page.mount();
    ui.click(page.cards[0]);

    ui.click(page.thumbnails[0]);

    assert!(page.is_active(page.popup));
    assert_eq!(ui.popup().unwrap().level(), PopupLevel::Detail);
    assert!(!ui.listeners().iter().any(|l| matches!(l.binding, Binding::Thumbnail(_))));
}

// ============================================================================
// Slide viewer
// ============================================================================

#[test]
fn test_first_indicator_active_on_load() {
    let page = Page::mobile();
    let ui = page.mount();
    assert_eq!(ui.current_slide(), Some(0));
    assert_eq!(ui.slide_count(), Some(4));
    assert_eq!(page.active_indicators(), vec![0]);
}

#[test]
fn test_indicator_click_scrolls_to_slide() {
    let page = Page::mobile();
    let mut ui = page.mount();

    ui.click(page.indicators[2]);

    assert_eq!(ui.current_slide(), Some(2));
    assert_eq!(page.active_indicators(), vec![2]);
    assert_eq!(
        page.dom.scroll_requests(),
        vec![(page.container.unwrap(), 2.0 * VIEWPORT_HEIGHT)]
    );
}

#[test]
fn test_out_of_range_jump_is_ignored() {
    let page = Page::mobile();
    let mut ui = page.mount();
    ui.go_to(1);

    ui.go_to(4);
    ui.go_to(usize::MAX);

    assert_eq!(ui.current_slide(), Some(1));
    assert_eq!(page.dom.scroll_requests().len(), 1);
}

#[test]
fn test_end_key_jumps_to_last_slide() {
    for start in 0..4 {
        let page = Page::mobile();
        let mut ui = page.mount();
        ui.go_to(start);

        let response = ui.press("End");
        assert!(response.prevent_default);
        assert_eq!(ui.current_slide(), Some(3));

        ui.press("End");
        assert_eq!(ui.current_slide(), Some(3));
        assert_eq!(page.active_indicators(), vec![3]);
    }
}

#[test]
fn test_arrow_and_page_keys_step_within_bounds() {
    let page = Page::mobile();
    let mut ui = page.mount();

    assert!(ui.press("ArrowUp").prevent_default);
    assert_eq!(ui.current_slide(), Some(0));

    ui.press("ArrowDown");
    ui.press("PageDown");
    assert_eq!(ui.current_slide(), Some(2));

    ui.press("PageUp");
    assert_eq!(ui.current_slide(), Some(1));

    ui.press("End");
    ui.press("ArrowDown");
    assert_eq!(ui.current_slide(), Some(3));

    ui.press("Home");
    assert_eq!(ui.current_slide(), Some(0));
    assert_eq!(page.active_indicators(), vec![0]);
}

#[test]
fn test_other_keys_keep_default_behavior() {
    let page = Page::mobile();
    let mut ui = page.mount();
    for key in ["Enter", " ", "ArrowLeft", "a"] {
        assert!(!ui.press(key).prevent_default);
    }
    assert_eq!(ui.current_slide(), Some(0));
}

#[test]
fn test_swipe_threshold() {
    let page = Page::mobile();
    let mut ui = page.mount();
    let container = page.container.unwrap();

    ui.swipe(container, 600.0, 550.0);
    assert_eq!(ui.current_slide(), Some(0), "exactly 50px is a tap");

    ui.swipe(container, 549.0, 600.0);
    assert_eq!(ui.current_slide(), Some(0), "no previous slide at the start");

    ui.swipe(container, 600.0, 549.0);
    assert_eq!(ui.current_slide(), Some(1));

    ui.swipe(container, 549.0, 600.0);
    assert_eq!(ui.current_slide(), Some(0));

    ui.go_to(3);
    ui.swipe(container, 600.0, 100.0);
    assert_eq!(ui.current_slide(), Some(3), "no next slide at the end");
}

#[test]
fn test_touchend_without_touchstart_is_ignored() {
    let page = Page::mobile();
    let mut ui = page.mount();
    let container = page.container.unwrap();

    ui.swipe(container, 600.0, 400.0);
    assert_eq!(ui.current_slide(), Some(1));

    ui.dispatch(Binding::SwipeEnd, Input::Touch { screen_y: 0.0 });
    assert_eq!(ui.current_slide(), Some(1), "start position is consumed by the first touchend");

    ui.dispatch(Binding::SwipeEnd, Input::Touch { screen_y: 900.0 });
    assert_eq!(ui.current_slide(), Some(1));
}

#[test]
fn test_settled_scroll_updates_index_once() {
    let page = Page::mobile();
    let mut ui = page.mount();
    let container = page.container.unwrap();

    for top in [300.0, 800.0, 1600.0, 2400.0, 1700.0] {
        ui.scroll_container_to(container, top);
        ui.advance(20);
    }
    assert_eq!(page.dom.pending_timers(), 1);
    assert_eq!(ui.current_slide(), Some(0), "still scrolling");

    ui.advance(79);
    assert_eq!(ui.current_slide(), Some(0));

    ui.advance(1);
    assert_eq!(ui.current_slide(), Some(2));
    assert_eq!(page.active_indicators(), vec![2]);
    assert_eq!(page.dom.pending_timers(), 0);
}

#[test]
fn test_settle_reads_position_at_fire_time() {
    let page = Page::mobile();
    let mut ui = page.mount();
    let container = page.container.unwrap();

    ui.scroll_container_to(container, 800.0);
    page.dom.set_scroll_top(container, 2300.0);
    ui.advance(100);

    assert_eq!(ui.current_slide(), Some(3));
}

#[test]
fn test_settle_past_last_slide_clamps() {
    let page = Page::mobile();
    let mut ui = page.mount();
    let container = page.container.unwrap();

    ui.scroll_container_to(container, 10.0 * VIEWPORT_HEIGHT);
    ui.advance(100);

    assert_eq!(ui.current_slide(), Some(3));
}

#[test]
fn test_parallax_runs_on_every_scroll_tick() {
    let page = Page::mobile();
    let mut ui = page.mount();
    let container = page.container.unwrap();

    ui.scroll_container_to(container, 400.0);

    assert_eq!(
        page.dom.transform(page.backgrounds[0]).as_deref(),
        Some("translateY(200px)")
    );
    assert_eq!(
        page.dom.transform(page.backgrounds[1]).as_deref(),
        Some("translateY(-200px)")
    );
    assert_eq!(
        page.dom.transform(page.backgrounds[3]).as_deref(),
        Some("translateY(-1000px)")
    );

    ui.scroll_container_to(container, 800.0);
    assert_eq!(
        page.dom.transform(page.backgrounds[1]).as_deref(),
        Some("translateY(0px)")
    );
    assert_eq!(ui.current_slide(), Some(0), "index waits for the settle");
}

#[test]
fn test_slides_without_container_plan_no_slide_listeners() {
    let page = Page::build(375.0, Features::all(0));
    let ui = page.mount();
    assert_eq!(ui.slide_count(), Some(0));

    let page = Page::build(
        375.0,
        Features {
            slides: None,
            ..Features::all(0)
        },
    );
    let mut ui = page.mount();
    assert_eq!(ui.current_slide(), None);
    assert!(!ui
        .listeners()
        .iter()
        .any(|l| l.binding == Binding::Keyboard || l.binding == Binding::Slides));
    assert!(!ui.press("ArrowDown").prevent_default);
}
