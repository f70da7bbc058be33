#![cfg(target_arch = "wasm32")]
use asterism_core::{Catalog, Session};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod panel;
mod render;
mod storage;

use constants::{CANVAS_ID, PROCEDURAL_STAR_COUNT, STARS_URL};

pub(crate) type App = Session<render::SceneGraph, storage::LocalStore, overlay::DomNotifier>;
pub(crate) type SharedApp = Rc<RefCell<App>>;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

async fn fetch_catalog(window: &web::Window) -> anyhow::Result<Catalog> {
    let resp: web::Response = JsFuture::from(window.fetch_with_str(STARS_URL))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("GET {} -> HTTP {}", STARS_URL, resp.status());
    }
    let body = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("{} body is not text", STARS_URL))?;
    Ok(Catalog::from_json(&body)?)
}

/// The real catalog if it loads, otherwise a seeded random sky so the page
/// stays usable.
async fn load_catalog(window: &web::Window, seed: u64) -> Catalog {
    match fetch_catalog(window).await {
        Ok(catalog) => catalog,
        Err(e) => {
            log::warn!("[catalog] {:#}; using a procedural sky", e);
            Catalog::procedural(PROCEDURAL_STAR_COUNT, seed)
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("asterism-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let seed: u64 = rand::random();
    let catalog = load_catalog(&window, seed).await;

    let mut gpu = frame::init_gpu(&canvas).await;
    let app: SharedApp = Rc::new(RefCell::new(Session::new(
        catalog,
        render::SceneGraph::default(),
        storage::LocalStore::open(),
        overlay::DomNotifier::default(),
        seed,
    )));
    if let Some(g) = &mut gpu {
        g.set_stars(&render::star_instances(app.borrow().layers()));
    }

    let rig = Rc::new(RefCell::new(input::CameraRig::default()));
    let drag = Rc::new(RefCell::new(input::DragState::default()));

    panel::wire(&document, &app);
    events::wire_global_keydown(app.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        app: app.clone(),
        rig: rig.clone(),
        drag,
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        canvas,
        document,
        rig,
        panel: panel::PanelView::default(),
        gpu,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
