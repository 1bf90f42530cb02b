//! Cancellable `requestAnimationFrame` loop.
//!
//! The loop is owned explicitly by whoever starts it; the per-frame function
//! is a plain callback with no scheduling knowledge of its own.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    // Keeps the tick closure alive for as long as the loop may fire.
    _tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

/// Schedule `frame_fn` on every animation frame until the returned handle is
/// cancelled.
pub fn start_loop(mut frame_fn: impl FnMut() + 'static) -> FrameLoop {
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let raf_for_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_fn();
        if let Some(w) = web::window() {
            if let Ok(id) = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            ) {
                raf_for_tick.set(Some(id));
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Ok(id) =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            raf_id.set(Some(id));
        }
    }
    FrameLoop {
        raf_id,
        _tick: tick,
    }
}

impl FrameLoop {
    /// Stop scheduling. Safe to call on an already-cancelled loop.
    pub fn cancel(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }
}
