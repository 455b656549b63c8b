use crate::core::Session;
use crate::{dom, events, frame, input, overlay};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, session: &Rc<RefCell<Session>>) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let session_resize = session.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        let (w, h) = input::canvas_css_size(&canvas_resize);
        session_resize.borrow_mut().resize(w, h);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("torus-sketch starting");

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

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let session = Rc::new(RefCell::new(Session::default()));
    {
        let (w, h) = input::canvas_css_size(&canvas);
        session.borrow_mut().resize(w, h);
    }

    wire_canvas_resize(&canvas, &session);
    dom::suppress_context_menu(&canvas);
    overlay::update_hint(&document, 0, false, false, None);

    events::wire_global_keydown(session.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        session: session.clone(),
    });

    let gpu = frame::init_gpu(&canvas, &session).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        canvas,
        gpu,
        rng: StdRng::from_entropy(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
