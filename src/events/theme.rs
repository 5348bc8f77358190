use crate::badges::BadgeJobs;
use crate::constants::{BODY_OBSERVED_ATTRIBUTES, DARK_SCHEME_QUERY, ROOT_OBSERVED_ATTRIBUTES};
use crate::dom;
use globe_core::resolve_mode;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Re-resolve the mode and refresh textures if it changed.
fn on_theme_signal(jobs: &BadgeJobs) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let mode = resolve_mode(&dom::read_theme_signals(&document));
    let changed = jobs.scene.borrow_mut().set_mode(mode);
    if changed {
        jobs.spawn_refresh(dom::pixel_ratio());
    }
}

fn observe_attributes(
    observer: &web::MutationObserver,
    target: &web::Node,
    attributes: &[&str],
) -> anyhow::Result<()> {
    let filter: js_sys::Array = attributes.iter().map(|a| JsValue::from_str(a)).collect();
    let init = web::MutationObserverInit::new();
    init.set_attributes(true);
    init.set_attribute_filter(&filter);
    observer
        .observe_with_options(target, &init)
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Watch the page-level theme markers and the OS color-scheme preference.
pub fn wire_theme_observers(document: &web::Document, jobs: &BadgeJobs) -> anyhow::Result<()> {
    let jobs_mut = jobs.clone();
    let on_mutation = Closure::wrap(Box::new(move |_records: js_sys::Array, _obs: JsValue| {
        on_theme_signal(&jobs_mut);
    }) as Box<dyn FnMut(js_sys::Array, JsValue)>);
    let observer = web::MutationObserver::new(on_mutation.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    on_mutation.forget();

    if let Some(root) = document.document_element() {
        observe_attributes(&observer, &root, &ROOT_OBSERVED_ATTRIBUTES)?;
    }
    if let Some(body) = document.body() {
        observe_attributes(&observer, &body, &BODY_OBSERVED_ATTRIBUTES)?;
    }

    let media = web::window().and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten());
    if let Some(mql) = media {
        let jobs_media = jobs.clone();
        let on_change = Closure::wrap(Box::new(move |_ev: web::Event| {
            on_theme_signal(&jobs_media);
        }) as Box<dyn FnMut(_)>);
        _ = mql.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
        on_change.forget();
    } else {
        log::debug!("[theme] color-scheme media query unavailable");
    }
    Ok(())
}
