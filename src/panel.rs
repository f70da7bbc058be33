//! Side panel: mode buttons, the create form and the saved-constellation
//! list. Rendering is diffed against what was last written so the frame loop
//! can call `PanelView::sync` every frame.

use crate::constants::*;
use crate::dom;
use crate::SharedApp;
use asterism_core::Mode;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default)]
pub struct PanelView {
    mode: Option<Mode>,
    list_revision: Option<u64>,
    highlighted: Option<Option<String>>,
    star_count: Option<String>,
    save_enabled: Option<bool>,
}

impl PanelView {
    pub fn sync(&mut self, document: &web::Document, app: &crate::App) {
        let mode = app.mode();
        if self.mode != Some(mode) {
            show_mode(document, mode);
            self.mode = Some(mode);
        }

        let revision = app.list_revision();
        if self.list_revision != Some(revision) {
            render_list(document, app);
            self.list_revision = Some(revision);
            self.highlighted = None;
        }

        let highlighted = app.highlighted().map(str::to_owned);
        if self.highlighted.as_ref() != Some(&highlighted) {
            apply_highlight(document, highlighted.as_deref());
            self.highlighted = Some(highlighted);
        }

        let label = app.star_count_label();
        if self.star_count.as_ref() != Some(&label) {
            if let Some(el) = document.get_element_by_id(STAR_COUNT) {
                el.set_text_content(Some(&label));
            }
            self.star_count = Some(label);
        }

        let enabled = app.can_save(&dom::input_value(document, NAME_INPUT));
        if self.save_enabled != Some(enabled) {
            if let Some(btn) = document
                .get_element_by_id(SAVE_BTN)
                .and_then(|el| el.dyn_into::<web::HtmlButtonElement>().ok())
            {
                btn.set_disabled(!enabled);
            }
            self.save_enabled = Some(enabled);
        }
    }
}

fn show_mode(document: &web::Document, mode: Mode) {
    let panels = [
        (EXPLORE_PANEL, EXPLORE_MODE_BTN, Mode::Explore),
        (CREATE_PANEL, CREATE_MODE_BTN, Mode::Create),
    ];
    for (panel_id, btn_id, panel_mode) in panels {
        let active = panel_mode == mode;
        if let Some(panel) = document
            .get_element_by_id(panel_id)
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        {
            _ = panel
                .style()
                .set_property("display", if active { "block" } else { "none" });
        }
        if let Some(btn) = document.get_element_by_id(btn_id) {
            _ = btn.class_list().toggle_with_force("active-mode", active);
        }
    }
}

fn render_list(document: &web::Document, app: &crate::App) {
    let Some(list) = document.get_element_by_id(LIST_ID) else {
        return;
    };
    list.set_inner_html("");

    let constellations = app.constellations();
    if constellations.is_empty() {
        if let Ok(p) = document.create_element("p") {
            p.set_class_name("empty-list");
            p.set_text_content(Some(EMPTY_LIST_TEXT));
            _ = list.append_child(&p);
        }
        return;
    }

    for con in constellations {
        let Ok(item) = document.create_element("div") else {
            continue;
        };
        item.set_class_name("constellation-item");
        _ = item.set_attribute("data-id", &con.id);
        if let Ok(label) = document.create_element("span") {
            label.set_text_content(Some(&con.label()));
            _ = item.append_child(&label);
        }
        if let Ok(delete) = document.create_element("button") {
            delete.set_class_name("delete-btn");
            delete.set_text_content(Some("Delete"));
            _ = item.append_child(&delete);
        }
        _ = list.append_child(&item);
    }
}

fn apply_highlight(document: &web::Document, highlighted: Option<&str>) {
    let Ok(items) = document.query_selector_all(".constellation-item") else {
        return;
    };
    for i in 0..items.length() {
        let Some(item) = items
            .item(i)
            .and_then(|node| node.dyn_into::<web::Element>().ok())
        else {
            continue;
        };
        let selected = highlighted.is_some() && item.get_attribute("data-id").as_deref() == highlighted;
        _ = item.class_list().toggle_with_force("selected", selected);
    }
}

// ---------------- Wiring ----------------

pub fn wire(document: &web::Document, app: &SharedApp) {
    let a = app.clone();
    dom::add_click_listener(document, EXPLORE_MODE_BTN, move || {
        a.borrow_mut().switch_mode(Mode::Explore);
    });

    let a = app.clone();
    dom::add_click_listener(document, CREATE_MODE_BTN, move || {
        a.borrow_mut().switch_mode(Mode::Create);
    });

    let a = app.clone();
    dom::add_click_listener(document, SAVE_BTN, move || save_clicked(&a));

    let a = app.clone();
    dom::add_click_listener(document, CLEAR_ALL_BTN, move || {
        if dom::confirm(CLEAR_CONFIRM_TEXT) {
            a.borrow_mut().clear_all();
        }
    });

    wire_list(document, app);
}

fn save_clicked(app: &SharedApp) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let name = dom::input_value(&document, NAME_INPUT);
    let result = app
        .borrow_mut()
        .save_current(&name, dom::now_ms(), dom::wall_clock_ms());
    match result {
        Ok(saved) => {
            log::info!("[panel] saved '{}' as {}", saved.name, saved.id);
            dom::set_input_value(&document, NAME_INPUT, "");
        }
        Err(e) => {
            log::warn!("[panel] save rejected: {}", e);
            dom::alert(&e.to_string());
        }
    }
}

/// One delegated listener for the whole list; items are rebuilt whenever the
/// list changes.
fn wire_list(document: &web::Document, app: &SharedApp) {
    let Some(list) = document.get_element_by_id(LIST_ID) else {
        log::warn!("[panel] missing #{}", LIST_ID);
        return;
    };
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(target) = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
        else {
            return;
        };
        let Some(item) = target.closest(".constellation-item").ok().flatten() else {
            return;
        };
        let Some(id) = item.get_attribute("data-id") else {
            return;
        };
        if target.class_list().contains("delete-btn") {
            ev.stop_propagation();
            if dom::confirm(DELETE_CONFIRM_TEXT) {
                app.borrow_mut().delete_constellation(&id);
            }
        } else {
            app.borrow_mut().display_constellation(&id, dom::now_ms());
        }
    }) as Box<dyn FnMut(_)>);
    _ = list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
