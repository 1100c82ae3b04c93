//! `requestAnimationFrame` driver.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::dom;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Calls `step` once per display frame with the frame timestamp until it
/// returns `false`, then stops rescheduling and drops the callback.
pub fn run_while(mut step: impl FnMut(f64) -> bool + 'static) -> Result<(), JsValue> {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if !step(timestamp) {
            let _ = f.borrow_mut().take();
            return;
        }
        if let Err(e) = request_frame(&f) {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
    }) as Box<dyn FnMut(f64)>));

    request_frame(&g)
}

fn request_frame(f: &FrameCallback) -> Result<(), JsValue> {
    let slot = f.borrow();
    let Some(callback) = slot.as_ref() else {
        return Ok(());
    };
    dom::window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}
