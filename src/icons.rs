use crate::constants::ICON_TIMEOUT_MS;
use globe_core::IconError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch an icon as a decoded image element. CORS-enabled so the badge
/// canvas stays readable after it is drawn. Gives up after `ICON_TIMEOUT_MS`.
pub async fn load_icon(url: &str) -> Result<web::HtmlImageElement, IconError> {
    let load_err = |e: JsValue| IconError::Load {
        url: url.to_string(),
        reason: format!("{:?}", e),
    };
    let img = web::HtmlImageElement::new().map_err(load_err)?;
    img.set_cross_origin(Some("anonymous"));

    let img_for_promise = img.clone();
    let load = js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::once_into_js(move || {
            _ = resolve.call1(&JsValue::NULL, &JsValue::TRUE);
        });
        let onerror = Closure::once_into_js(move |ev: JsValue| {
            _ = reject.call1(&JsValue::NULL, &ev);
        });
        img_for_promise.set_onload(Some(onload.unchecked_ref()));
        img_for_promise.set_onerror(Some(onerror.unchecked_ref()));
    });
    // Resolves with `false` once the deadline passes.
    let deadline = js_sys::Promise::new(&mut |resolve, _reject| {
        let on_timeout = Closure::once_into_js(move || {
            _ = resolve.call1(&JsValue::NULL, &JsValue::FALSE);
        });
        if let Some(w) = web::window() {
            _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                on_timeout.unchecked_ref(),
                ICON_TIMEOUT_MS as i32,
            );
        }
    });
    img.set_src(url);

    let settled = JsFuture::from(js_sys::Promise::race(&js_sys::Array::of2(&load, &deadline))).await;
    img.set_onload(None);
    img.set_onerror(None);
    match settled {
        Ok(v) if v.as_bool() == Some(true) => {
            log::debug!("[icon] loaded {}", url);
            Ok(img)
        }
        Ok(_) => {
            // Abort the request; a late load must not repaint anything.
            img.set_src("");
            Err(IconError::Timeout {
                url: url.to_string(),
                after_ms: ICON_TIMEOUT_MS,
            })
        }
        Err(_) => Err(IconError::Load {
            url: url.to_string(),
            reason: "image failed to load".to_string(),
        }),
    }
}
