use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use warpfield_core::{FrameCallback, FrameRequester, FrameScheduler, RequestScheduler};
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame`/`cancelAnimationFrame` on the global window,
/// always re-arming the same tick closure.
#[derive(Clone)]
pub struct AnimationFrames {
    tick: Weak<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameRequester for AnimationFrames {
    type Handle = i32;

    fn request_frame(&self) -> Option<i32> {
        let window = web::window()?;
        let tick = self.tick.upgrade()?;
        let tick = tick.borrow();
        let closure = tick.as_ref()?;
        window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&self, handle: i32) {
        if let Some(w) = web::window() {
            _ = w.cancel_animation_frame(handle);
        }
    }
}

/// [`FrameScheduler`] driven by `requestAnimationFrame`.
///
/// One recurring closure is allocated per scheduler and released on drop.
pub struct RafScheduler {
    inner: RequestScheduler<AnimationFrames>,
    tick: Tick,
}

impl RafScheduler {
    pub fn new() -> Self {
        let tick: Tick = Rc::new(RefCell::new(None));
        let inner = RequestScheduler::new(AnimationFrames {
            tick: Rc::downgrade(&tick),
        });
        let driver = inner.driver();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            driver.deliver();
        }) as Box<dyn FnMut()>));
        Self { inner, tick }
    }
}

impl Default for RafScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for RafScheduler {
    fn start(&mut self, callback: FrameCallback) {
        self.inner.start(callback);
    }

    fn stop(&mut self) {
        self.inner.stop();
    }

    fn is_running(&self) -> bool {
        self.inner.is_running()
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        self.inner.stop();
        self.tick.borrow_mut().take();
    }
}
