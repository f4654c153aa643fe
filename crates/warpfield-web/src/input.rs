use crate::constants::{GLYPH_ID_PREFIX, SCROLL_PROGRESS_VAR};
use crate::dom;
use crate::events::EventSubscription;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use warpfield_core::ParallaxTracker;
use web_sys as web;

/// Window `mousemove` and `scroll` listeners feeding a [`ParallaxTracker`].
/// Both listeners are removed when this is dropped.
pub struct ParallaxInput {
    _pointer: EventSubscription,
    _scroll: EventSubscription,
}

impl ParallaxInput {
    pub fn subscribe(tracker: Rc<RefCell<ParallaxTracker>>) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let target: &web::EventTarget = window.as_ref();

        let tracker_move = tracker.clone();
        let pointer = EventSubscription::listen(target, "mousemove", move |ev: web::Event| {
            if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
                tracker_move
                    .borrow_mut()
                    .on_pointer_move(ev.client_x() as f64, ev.client_y() as f64);
                apply_glyph_anchors(&tracker_move.borrow());
            }
        })?;

        let tracker_scroll = tracker.clone();
        let scroll = EventSubscription::listen(target, "scroll", move |_ev: web::Event| {
            refresh_scroll(&tracker_scroll);
        })?;

        // Pages restored mid-scroll report a position before any event fires
        refresh_scroll(&tracker);
        apply_glyph_anchors(&tracker.borrow());

        Ok(Self {
            _pointer: pointer,
            _scroll: scroll,
        })
    }
}

fn refresh_scroll(tracker: &Rc<RefCell<ParallaxTracker>>) {
    let Some(window) = web::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let scroll_top = window.scroll_y().unwrap_or(0.0);
    let (_, viewport_h) = dom::viewport_size(&window);
    let progress = {
        let mut t = tracker.borrow_mut();
        t.on_scroll(scroll_top, dom::document_height(&document), viewport_h);
        t.scroll_progress()
    };
    dom::set_root_property(&document, SCROLL_PROGRESS_VAR, &format!("{progress:.4}"));
}

fn apply_glyph_anchors(tracker: &ParallaxTracker) {
    let Some(document) = dom::window_document() else {
        return;
    };
    for (i, anchor) in tracker.glyph_anchors().iter().enumerate() {
        let id = format!("{GLYPH_ID_PREFIX}{i}");
        let (h_edge, h) = anchor.horizontal;
        let (v_edge, v) = anchor.vertical;
        dom::set_style(&document, &id, h_edge.css_property(), &format!("{h}%"));
        dom::set_style(&document, &id, v_edge.css_property(), &format!("{v}%"));
    }
}
