#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use warpfield_core::{
    FrameLoop, ParallaxTracker, Starfield, StarfieldParams, Wormhole, WormholeParams,
};
use web_sys as web;

mod canvas;
mod constants;
mod dom;
mod events;
mod frame;
mod input;

use canvas::CanvasSurface;
use frame::RafScheduler;
use input::ParallaxInput;

type CanvasLoop = FrameLoop<RafScheduler>;

fn start_starfield(document: &web::Document, canvas_id: &str) -> anyhow::Result<CanvasLoop> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let canvas = dom::canvas_by_id(document, canvas_id)?;
    let ctx = dom::context_2d(&canvas)?;
    // Sized once; later window resizes keep these bounds
    let (w, h) = dom::viewport_size(&window);
    let (w, h) = (w as u32, h as u32);
    // Build the engine first so a rejected viewport leaves the canvas untouched
    let mut starfield = Starfield::new(
        w as f64,
        h as f64,
        StarfieldParams::default(),
        rand::random(),
    )?;
    let mut surface = CanvasSurface::sized(&canvas, ctx, w, h);
    Ok(FrameLoop::start(RafScheduler::new(), move || {
        starfield.frame(&mut surface);
    }))
}

fn start_wormhole(document: &web::Document, canvas_id: &str) -> anyhow::Result<CanvasLoop> {
    let canvas = dom::canvas_by_id(document, canvas_id)?;
    let ctx = dom::context_2d(&canvas)?;
    let params = WormholeParams::default();
    let side = params.size as u32;
    let mut wormhole = Wormhole::new(params)?;
    let mut surface = CanvasSurface::sized(&canvas, ctx, side, side);
    Ok(FrameLoop::start(RafScheduler::new(), move || {
        wormhole.frame(&mut surface);
    }))
}

/// Handle owning both animations and the parallax listeners.
///
/// Anything whose canvas is missing is skipped without error; calling
/// `mount` again later picks it up. Dropping (or `free()` from JS) unmounts.
#[wasm_bindgen]
pub struct Background {
    starfield_canvas_id: String,
    wormhole_canvas_id: String,
    starfield: Option<CanvasLoop>,
    wormhole: Option<CanvasLoop>,
    parallax: Option<ParallaxInput>,
    tracker: Rc<RefCell<ParallaxTracker>>,
}

#[wasm_bindgen]
impl Background {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Background {
        Self::with_canvas_ids(constants::STARFIELD_CANVAS_ID, constants::WORMHOLE_CANVAS_ID)
    }

    pub fn with_canvas_ids(starfield_canvas_id: &str, wormhole_canvas_id: &str) -> Background {
        Background {
            starfield_canvas_id: starfield_canvas_id.to_owned(),
            wormhole_canvas_id: wormhole_canvas_id.to_owned(),
            starfield: None,
            wormhole: None,
            parallax: None,
            tracker: Rc::new(RefCell::new(ParallaxTracker::new())),
        }
    }

    /// Start whatever is not yet running. Returns true once everything runs.
    pub fn mount(&mut self) -> bool {
        let Some(document) = dom::window_document() else {
            log::warn!("[mount] no document; nothing started");
            return false;
        };
        if self.starfield.is_none() {
            match start_starfield(&document, &self.starfield_canvas_id) {
                Ok(l) => {
                    log::info!("[mount] starfield on #{}", self.starfield_canvas_id);
                    self.starfield = Some(l);
                }
                Err(e) => log::warn!("[mount] starfield not started: {e}"),
            }
        }
        if self.wormhole.is_none() {
            match start_wormhole(&document, &self.wormhole_canvas_id) {
                Ok(l) => {
                    log::info!("[mount] wormhole on #{}", self.wormhole_canvas_id);
                    self.wormhole = Some(l);
                }
                Err(e) => log::warn!("[mount] wormhole not started: {e}"),
            }
        }
        if self.parallax.is_none() {
            match ParallaxInput::subscribe(self.tracker.clone()) {
                Ok(p) => self.parallax = Some(p),
                Err(e) => log::warn!("[mount] parallax listeners not attached: {e}"),
            }
        }
        self.is_running()
    }

    /// Stop both loops and detach listeners. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        let was_running =
            self.starfield.is_some() || self.wormhole.is_some() || self.parallax.is_some();
        self.starfield = None;
        self.wormhole = None;
        self.parallax = None;
        if was_running {
            log::info!("[unmount] background stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        let looping = |l: &Option<CanvasLoop>| l.as_ref().is_some_and(|l| l.is_running());
        looping(&self.starfield) && looping(&self.wormhole) && self.parallax.is_some()
    }

    pub fn scroll_progress(&self) -> f64 {
        self.tracker.borrow().scroll_progress()
    }

    pub fn pointer_x(&self) -> f64 {
        self.tracker.borrow().pointer().x
    }

    pub fn pointer_y(&self) -> f64 {
        self.tracker.borrow().pointer().y
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        self.unmount();
    }
}

thread_local! {
    static DEFAULT_BACKGROUND: RefCell<Option<Background>> = const { RefCell::new(None) };
}

/// (Re)mount the page-wide background using the default canvas ids.
#[wasm_bindgen]
pub fn mount_background() -> bool {
    DEFAULT_BACKGROUND.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(Background::new)
            .mount()
    })
}

/// Stop and release the page-wide background.
#[wasm_bindgen]
pub fn teardown_background() {
    let taken = DEFAULT_BACKGROUND.with(|slot| slot.borrow_mut().take());
    drop(taken);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("warpfield-web starting");
    mount_background();
    Ok(())
}
