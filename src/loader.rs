//! Streamed asset fetch with byte-level progress.

use showcase_core::loader::reserve_hint;
use showcase_core::AssetError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn stream_err(e: JsValue) -> AssetError {
    AssetError::Stream(format!("{:?}", e))
}

/// Fetches `path`, calling `on_progress(loaded, total)` after every chunk.
/// `total` is 0 when the server sends no usable `Content-Length`.
pub async fn fetch_bytes(
    path: &str,
    mut on_progress: impl FnMut(u64, u64),
) -> Result<Vec<u8>, AssetError> {
    let window = web::window().ok_or_else(|| AssetError::Stream("no window".into()))?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(stream_err)?
        .dyn_into()
        .map_err(stream_err)?;
    if !response.ok() {
        return Err(AssetError::Http {
            status: response.status(),
            path: path.to_string(),
        });
    }
    let total = response
        .headers()
        .get("content-length")
        .ok()
        .flatten()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0);

    let Some(body) = response.body() else {
        // no stream support: take the whole body at once
        let buf = JsFuture::from(response.array_buffer().map_err(stream_err)?)
            .await
            .map_err(stream_err)?;
        let bytes = js_sys::Uint8Array::new(&buf).to_vec();
        on_progress(bytes.len() as u64, total);
        return Ok(bytes);
    };

    let reader: web::ReadableStreamDefaultReader = body.get_reader().unchecked_into();
    let mut bytes: Vec<u8> = Vec::with_capacity(reserve_hint(total));
    loop {
        let chunk = JsFuture::from(reader.read()).await.map_err(stream_err)?;
        let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
            .map_err(stream_err)?
            .as_bool()
            .unwrap_or(true);
        if done {
            break;
        }
        let value = js_sys::Reflect::get(&chunk, &JsValue::from_str("value")).map_err(stream_err)?;
        let array = js_sys::Uint8Array::new(&value);
        let start = bytes.len();
        bytes.resize(start + array.length() as usize, 0);
        array.copy_to(&mut bytes[start..]);
        on_progress(bytes.len() as u64, total);
    }
    Ok(bytes)
}
