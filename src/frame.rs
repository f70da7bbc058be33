use crate::input;
use crate::panel::PanelView;
use crate::render;
use crate::SharedApp;
use asterism_core::glow::GlowFrame;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub app: SharedApp,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub rig: Rc<RefCell<input::CameraRig>>,
    pub panel: PanelView,
    pub gpu: Option<render::GpuState>,
}

impl FrameContext {
    /// One animation frame; `now_ms` is the rAF timestamp.
    pub fn frame(&mut self, now_ms: f64) {
        let viewport = input::canvas_viewport(&self.canvas);
        let camera = self.rig.borrow().camera(viewport);

        {
            let mut app = self.app.borrow_mut();
            app.set_view(&camera, viewport);
            if let Some(GlowFrame::Finished) = app.tick(now_ms) {
                log::debug!("[frame] glow replay finished");
            }
            app.refresh_marker_scales(now_ms);
            app.notifier_mut().tick(now_ms);
            self.panel.sync(&self.document, &app);
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let app = self.app.borrow();
            if let Err(e) = g.render(&camera, viewport, app.scene()) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        frame_ctx.borrow_mut().frame(now_ms);
        request_frame(&tick_clone);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
