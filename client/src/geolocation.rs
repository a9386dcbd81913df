#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use estate_map_shared::LatLng;
use js_sys::{Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

/// Ask the browser once for the user's position. Does nothing when the
/// Geolocation API is missing; denial and timeouts are ignored.
pub fn locate(on_position: impl FnOnce(LatLng) + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let Ok(geolocation) = Reflect::get(navigator.as_ref(), &JsValue::from_str("geolocation")) else {
        return;
    };
    if geolocation.is_undefined() || geolocation.is_null() {
        return;
    }
    let Some(get_current_position) =
        Reflect::get(&geolocation, &JsValue::from_str("getCurrentPosition"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
    else {
        return;
    };

    let on_success = Closure::once(move |position: JsValue| {
        if let Some(pos) = read_coords(&position) {
            on_position(pos);
        }
    });
    let on_error = Closure::once(|_: JsValue| {});
    let _ = get_current_position.call2(&geolocation, on_success.as_ref(), on_error.as_ref());
    on_success.forget();
    on_error.forget();
}

fn read_coords(position: &JsValue) -> Option<LatLng> {
    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let lat = Reflect::get(&coords, &JsValue::from_str("latitude")).ok()?.as_f64()?;
    let lng = Reflect::get(&coords, &JsValue::from_str("longitude")).ok()?.as_f64()?;
    Some(LatLng::new(lat, lng))
}
