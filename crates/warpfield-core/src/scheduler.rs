//! Frame scheduling seam.
//!
//! Engines never talk to a repaint primitive directly. A [`FrameScheduler`]
//! invokes one callback per display refresh; the web frontend backs it with
//! `requestAnimationFrame` through [`RequestScheduler`], tests and headless
//! hosts use [`ManualScheduler`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type FrameCallback = Box<dyn FnMut()>;

pub trait FrameScheduler {
    /// Begin invoking `callback` once per frame. A running scheduler drops its
    /// previous callback first.
    fn start(&mut self, callback: FrameCallback);
    /// No invocation happens after this returns. Idempotent.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Scheduler whose frames are delivered by calling [`ManualScheduler::advance`].
#[derive(Default)]
pub struct ManualScheduler {
    callback: Option<FrameCallback>,
    frames_delivered: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one frame. Returns false when stopped.
    pub fn advance(&mut self) -> bool {
        match self.callback.as_mut() {
            Some(cb) => {
                cb();
                self.frames_delivered += 1;
                true
            }
            None => false,
        }
    }

    /// Deliver up to `frames` frames, returning how many were delivered.
    pub fn advance_by(&mut self, frames: u64) -> u64 {
        let mut delivered = 0;
        for _ in 0..frames {
            if !self.advance() {
                break;
            }
            delivered += 1;
        }
        delivered
    }

    pub fn frames_delivered(&self) -> u64 {
        self.frames_delivered
    }
}

impl FrameScheduler for ManualScheduler {
    fn start(&mut self, callback: FrameCallback) {
        self.callback = Some(callback);
    }

    fn stop(&mut self) {
        self.callback = None;
    }

    fn is_running(&self) -> bool {
        self.callback.is_some()
    }
}

/// One-shot "call me on the next frame" primitive, such as
/// `requestAnimationFrame`/`cancelAnimationFrame`.
///
/// A granted request must eventually lead to exactly one
/// [`FrameDriver::deliver`] unless it is cancelled first.
pub trait FrameRequester {
    type Handle: Copy;
    /// Ask for one frame. `None` means the primitive is unavailable.
    fn request_frame(&self) -> Option<Self::Handle>;
    fn cancel_frame(&self, handle: Self::Handle);
}

struct FrameSlot<H> {
    running: bool,
    pending: Option<H>,
    callback: Option<FrameCallback>,
}

/// [`FrameScheduler`] on top of a one-shot [`FrameRequester`].
///
/// At most one request is outstanding at a time. The callback is taken out of
/// the shared slot while it runs, so it may stop or restart the scheduler
/// itself; the frame then either ends the loop or keeps the replacement.
pub struct RequestScheduler<R: FrameRequester> {
    slot: Rc<RefCell<FrameSlot<R::Handle>>>,
    requester: R,
}

impl<R: FrameRequester + Clone> RequestScheduler<R> {
    pub fn new(requester: R) -> Self {
        Self {
            slot: Rc::new(RefCell::new(FrameSlot {
                running: false,
                pending: None,
                callback: None,
            })),
            requester,
        }
    }

    /// Entry point the requester's frame handler calls. Holds the slot weakly
    /// so a dropped scheduler turns late frames into no-ops.
    pub fn driver(&self) -> FrameDriver<R> {
        FrameDriver {
            slot: Rc::downgrade(&self.slot),
            requester: self.requester.clone(),
        }
    }

    /// Whether a frame request is outstanding.
    pub fn has_pending_frame(&self) -> bool {
        self.slot.borrow().pending.is_some()
    }
}

impl<R: FrameRequester + Clone> FrameScheduler for RequestScheduler<R> {
    fn start(&mut self, callback: FrameCallback) {
        self.stop();
        {
            let mut s = self.slot.borrow_mut();
            s.running = true;
            s.callback = Some(callback);
        }
        let pending = self.requester.request_frame();
        let dropped = {
            let mut s = self.slot.borrow_mut();
            s.pending = pending;
            if pending.is_none() {
                s.running = false;
                s.callback.take()
            } else {
                None
            }
        };
        if dropped.is_some() {
            log::warn!("[scheduler] frame request refused; loop not started");
        }
    }

    fn stop(&mut self) {
        let (pending, callback) = {
            let mut s = self.slot.borrow_mut();
            s.running = false;
            (s.pending.take(), s.callback.take())
        };
        if let Some(handle) = pending {
            self.requester.cancel_frame(handle);
        }
        drop(callback);
    }

    fn is_running(&self) -> bool {
        self.slot.borrow().running
    }
}

/// Weak handle that runs one frame of a [`RequestScheduler`].
pub struct FrameDriver<R: FrameRequester> {
    slot: Weak<RefCell<FrameSlot<R::Handle>>>,
    requester: R,
}

impl<R: FrameRequester> FrameDriver<R> {
    /// Run the callback for a granted frame and request the next one.
    /// Returns false when nothing ran (stopped, or scheduler dropped).
    pub fn deliver(&self) -> bool {
        let Some(slot) = self.slot.upgrade() else {
            return false;
        };
        let taken = {
            let mut s = slot.borrow_mut();
            s.pending = None;
            if s.running {
                s.callback.take()
            } else {
                None
            }
        };
        let Some(mut callback) = taken else {
            return false;
        };
        callback();

        let stale = {
            let mut s = slot.borrow_mut();
            if !s.running || s.callback.is_some() {
                // stopped, or restarted with a new callback, during the frame
                Some(callback)
            } else {
                s.callback = Some(callback);
                None
            }
        };
        drop(stale);

        let needs_request = {
            let s = slot.borrow();
            s.running && s.pending.is_none()
        };
        if needs_request {
            let pending = self.requester.request_frame();
            let dropped = {
                let mut s = slot.borrow_mut();
                s.pending = pending;
                if pending.is_none() {
                    s.running = false;
                    s.callback.take()
                } else {
                    None
                }
            };
            if dropped.is_some() {
                log::warn!("[scheduler] frame request refused; loop stopped");
            }
        }
        true
    }
}

/// Running frame loop that owns its scheduler.
///
/// Creating the loop starts the scheduler; dropping it stops the scheduler on
/// every exit path, including unwinding out of a frame callback.
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn start(mut scheduler: S, callback: impl FnMut() + 'static) -> Self {
        scheduler.start(Box::new(callback));
        Self { scheduler }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.scheduler.stop();
    }
}
