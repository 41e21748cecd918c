use crate::Shared;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_input_handlers(
    element: &web::Element,
    shared: &Rc<RefCell<Shared>>,
) -> anyhow::Result<()> {
    wire_mousemove(element, shared)?;
    wire_hover(element, shared)?;
    wire_resize(element, shared)?;
    sync_viewport(element, shared);
    log::info!("[events] listening on <{}>", element.tag_name().to_lowercase());
    Ok(())
}

fn wire_mousemove(element: &web::Element, shared: &Rc<RefCell<Shared>>) -> anyhow::Result<()> {
    let shared = shared.clone();
    let target = element.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        // pointer position relative to the element's top-left corner
        let rect = target.get_bounding_client_rect();
        let x = ev.client_x() as f64 - rect.left();
        let y = ev.client_y() as f64 - rect.top();
        shared
            .borrow_mut()
            .aquarium
            .resolver_mut()
            .on_pointer_move(x as f32, y as f32);
    }) as Box<dyn FnMut(_)>);
    element
        .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("mousemove listener: {:?}", e))?;
    closure.forget();
    Ok(())
}

fn wire_hover(element: &web::Element, shared: &Rc<RefCell<Shared>>) -> anyhow::Result<()> {
    let enter_shared = shared.clone();
    let enter = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        enter_shared
            .borrow_mut()
            .aquarium
            .resolver_mut()
            .on_pointer_enter();
    }) as Box<dyn FnMut(_)>);
    element
        .add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("mouseenter listener: {:?}", e))?;
    enter.forget();

    let leave_shared = shared.clone();
    let leave = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        leave_shared
            .borrow_mut()
            .aquarium
            .resolver_mut()
            .on_pointer_leave();
    }) as Box<dyn FnMut(_)>);
    element
        .add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("mouseleave listener: {:?}", e))?;
    leave.forget();
    Ok(())
}

fn wire_resize(element: &web::Element, shared: &Rc<RefCell<Shared>>) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let element = element.clone();
    let shared = shared.clone();
    let closure = Closure::wrap(Box::new(move || {
        sync_viewport(&element, &shared);
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("resize listener: {:?}", e))?;
    closure.forget();
    Ok(())
}

// Collapsed elements report 0x0; the resolver keeps its last aspect then.
fn sync_viewport(element: &web::Element, shared: &Rc<RefCell<Shared>>) {
    let width = element.client_width() as f32;
    let height = element.client_height() as f32;
    shared
        .borrow_mut()
        .aquarium
        .resolver_mut()
        .on_resize(width, height);
}
