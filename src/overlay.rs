use crate::constants::MESSAGE_ID;
use crate::dom;
use asterism_core::notify::notification_look;
use asterism_core::{Notifier, Severity};
use wasm_bindgen::JsCast;
use web_sys as web;

const BASE_STYLE: &str = "position:fixed;top:50%;left:50%;padding:15px 30px;border-radius:10px;\
font-weight:bold;font-size:1.3em;z-index:10001;pointer-events:none;text-align:center;\
box-shadow:0 4px 20px rgba(0,0,0,0.4);";

struct Shown {
    el: web::HtmlElement,
    shown_at_ms: f64,
}

/// Transient message box in the middle of the page. Showing a message
/// replaces the current one; `tick` drives its fade and removes it when
/// done.
#[derive(Default)]
pub struct DomNotifier {
    current: Option<Shown>,
}

impl DomNotifier {
    pub fn tick(&mut self, now_ms: f64) {
        let Some(shown) = &self.current else {
            return;
        };
        match notification_look(now_ms - shown.shown_at_ms) {
            Some(look) => {
                let style = shown.el.style();
                _ = style.set_property("opacity", &format!("{:.3}", look.opacity));
                _ = style.set_property(
                    "transform",
                    &format!("translate(-50%, -50%) scale({:.3})", look.scale),
                );
            }
            None => self.remove(),
        }
    }

    fn remove(&mut self) {
        if let Some(shown) = self.current.take() {
            shown.el.remove();
        }
    }
}

impl Notifier for DomNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.remove();
        let Some(document) = dom::window_document() else {
            return;
        };
        // A stale box can survive a reload of the module; never show two.
        if let Some(stale) = document.get_element_by_id(MESSAGE_ID) {
            stale.remove();
        }
        let Some(el) = document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        else {
            return;
        };
        el.set_id(MESSAGE_ID);
        el.set_text_content(Some(message));
        _ = el.set_attribute(
            "style",
            &format!(
                "{}background:{};color:{};opacity:0;transform:translate(-50%, -50%) scale(1);",
                BASE_STYLE,
                severity.background(),
                severity.foreground()
            ),
        );
        _ = el.set_attribute("data-severity", severity.as_str());
        let Some(body) = document.body() else {
            return;
        };
        if body.append_child(&el).is_err() {
            return;
        }
        log::info!("[notify] {}: {}", severity.as_str(), message);
        self.current = Some(Shown {
            el,
            shown_at_ms: dom::now_ms(),
        });
    }
}
