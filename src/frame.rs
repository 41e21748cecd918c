use crate::Shared;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Step the school once per animation frame and hand the packed instances to
/// `on_frame`. The shared state is released before the callback runs, so the
/// page may spawn fish or query the aquarium from inside it.
pub fn start_loop(shared: Rc<RefCell<Shared>>, on_frame: js_sys::Function) {
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let instances = {
            let mut s = shared.borrow_mut();
            let time = s.clock.advance();
            s.step(time)
        };
        if let Err(e) = on_frame.call1(&JsValue::NULL, &instances) {
            log::error!("[frame] callback error: {:?}", e);
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Tick) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
