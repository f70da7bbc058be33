use crate::input::is_reset_key;
use crate::SharedApp;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys typed into a form field belong to the field.
fn from_text_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA"))
        .unwrap_or(false)
}

pub fn wire_global_keydown(app: SharedApp) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() || from_text_field(&ev) {
            return;
        }
        if is_reset_key(&ev.key()) {
            app.borrow_mut().reset_key();
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
