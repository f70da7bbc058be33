use crate::dom;
use crate::input;
use crate::SharedApp;
use asterism_core::ClickOutcome;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub app: SharedApp,
    pub rig: Rc<RefCell<input::CameraRig>>,
    pub drag: Rc<RefCell<input::DragState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_click(&w);
    wire_contextmenu(&w);
    wire_wheel(&w);
}

fn listen<E>(target: &web::EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let pos = input::pointer_css_px(&ev, &w2.canvas);
        w2.drag.borrow_mut().begin(ev.pointer_id(), pos);
        _ = w2.canvas.set_pointer_capture(ev.pointer_id());
    });
}

fn wire_pointermove(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointermove", move |ev: web::PointerEvent| {
        let pos = input::pointer_css_px(&ev, &w2.canvas);
        let delta = {
            let mut drag = w2.drag.borrow_mut();
            if drag.pointer_id != ev.pointer_id() {
                return;
            }
            drag.move_to(pos)
        };
        if let Some(delta) = delta {
            if w2.drag.borrow().suppress_click {
                w2.rig.borrow_mut().drag(delta);
            }
        }
    });
}

fn wire_pointerup(w: &InputWiring) {
    for event in ["pointerup", "pointercancel"] {
        let w2 = w.clone();
        listen(&w.canvas, event, move |ev: web::PointerEvent| {
            w2.drag.borrow_mut().end();
            _ = w2.canvas.release_pointer_capture(ev.pointer_id());
        });
    }
}

fn wire_click(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "click", move |ev: web::MouseEvent| {
        if w2.drag.borrow_mut().take_click_suppression() {
            return;
        }
        let pos = input::pointer_css_px(&ev, &w2.canvas);
        let outcome = w2.app.borrow_mut().primary_click(pos, dom::now_ms());
        match outcome {
            ClickOutcome::Toggled(toggle, index) => {
                log::debug!("[input] star {} {:?}", index, toggle)
            }
            ClickOutcome::Ignored => log::debug!("[input] click ignored during replay"),
            other => log::debug!("[input] click: {:?}", other),
        }
    });
}

fn wire_contextmenu(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "contextmenu", move |ev: web::MouseEvent| {
        ev.prevent_default();
        w2.app.borrow_mut().secondary_action();
    });
}

fn wire_wheel(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        w2.rig.borrow_mut().zoom(ev.delta_y() as f32);
    });
}
