use crate::badges::SharedScene;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Drag-to-rotate: pointerdown on the canvas, move/up/cancel on the window so
/// a drag that leaves the canvas keeps tracking.
pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, scene: &SharedScene) {
    wire_pointerdown(canvas, scene);
    wire_pointermove(scene);
    wire_pointerup(scene, "pointerup");
    wire_pointerup(scene, "pointercancel");
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, scene: &SharedScene) {
    let scene = scene.clone();
    let canvas_for_capture = canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        scene
            .borrow_mut()
            .pointer_down(ev.client_x() as f32, ev.client_y() as f32);
        _ = canvas_for_capture.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(scene: &SharedScene) {
    let scene = scene.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        scene
            .borrow_mut()
            .pointer_move(ev.client_x() as f32, ev.client_y() as f32);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerup(scene: &SharedScene, event: &str) {
    let scene = scene.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        scene.borrow_mut().pointer_up();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }

    closure.forget();
}
