use crate::core::{command_for_key, KeyCommand, Session};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn refresh_hint(session: &Session) {
    if let Some(document) = crate::dom::window_document() {
        overlay::update_hint(
            &document,
            session.objects.len(),
            session.flicker,
            session.wireframe,
            session.last_stats(),
        );
    }
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, session: &Rc<RefCell<Session>>) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(cmd) = command_for_key(&ev.key()) else {
        return;
    };
    match cmd {
        KeyCommand::ToggleFlicker => {
            let mut s = session.borrow_mut();
            s.toggle_flicker();
            refresh_hint(&s);
        }
        KeyCommand::ToggleWireframe => {
            let mut s = session.borrow_mut();
            s.toggle_wireframe();
            refresh_hint(&s);
        }
        KeyCommand::ToggleHint => {
            if let Some(document) = crate::dom::window_document() {
                let shown = overlay::toggle(&document);
                log::info!("[keys] hint={}", shown);
            }
        }
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(session: Rc<RefCell<Session>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &session);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
