#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

//! Google Maps JS bindings and the browser-side collaborator impls.

use estate_map_shared::{City, ElementNode, LatLng};
use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlElement;

use crate::config::{FLIGHT_PATH_COLOR, FLIGHT_PATH_OPACITY, FLIGHT_PATH_WEIGHT};
use crate::dom;
use crate::error::MapError;
use crate::surface::{MapSurface, MarkerFactory, MarkerHandle};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = importLibrary, catch)]
    fn import_library(name: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(js_namespace = ["google", "maps", "event"], js_name = addListenerOnce)]
    fn add_listener_once(instance: &JsValue, event: &str, handler: &Function) -> JsValue;

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    #[derive(Debug, Clone)]
    pub type GoogleMap;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Map", catch)]
    fn new(container: &HtmlElement, options: &JsValue) -> Result<GoogleMap, JsValue>;

    #[wasm_bindgen(method, js_class = "Map", js_name = getZoom)]
    fn get_zoom(this: &GoogleMap) -> Option<f64>;

    #[wasm_bindgen(method, js_class = "Map", js_name = setZoom)]
    fn set_zoom(this: &GoogleMap, zoom: f64);

    #[wasm_bindgen(method, js_class = "Map", js_name = setCenter)]
    fn set_center(this: &GoogleMap, center: &JsValue);

    #[wasm_bindgen(method, js_class = "Map", js_name = addListener)]
    fn add_listener(this: &GoogleMap, event: &str, handler: &Function) -> JsValue;

    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    type Polyline;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
    fn new(options: &JsValue) -> Polyline;

    #[wasm_bindgen(method, js_name = setMap)]
    fn set_map(this: &Polyline, map: &GoogleMap);

    #[wasm_bindgen(js_namespace = ["google", "maps", "marker"])]
    #[derive(Debug, Clone)]
    pub type AdvancedMarkerElement;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps", "marker"])]
    fn new(options: &Object) -> AdvancedMarkerElement;

    #[wasm_bindgen(method, setter = map)]
    fn set_map(this: &AdvancedMarkerElement, map: &JsValue);

    #[wasm_bindgen(method, setter = zIndex)]
    fn set_z_index(this: &AdvancedMarkerElement, z_index: &JsValue);

    #[wasm_bindgen(method, getter)]
    fn content(this: &AdvancedMarkerElement) -> JsValue;

    #[wasm_bindgen(method, js_name = addListener)]
    fn add_listener(this: &AdvancedMarkerElement, event: &str, handler: &Function) -> JsValue;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions<'a> {
    zoom: f64,
    center: LatLng,
    map_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PolylineOptions<'a> {
    geodesic: bool,
    path: &'a [LatLng],
    stroke_color: &'a str,
    stroke_opacity: f64,
    stroke_weight: f64,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::UNDEFINED)
}

/// Libraries the map needs before anything is placed.
const LIBRARIES: &[&str] = &["maps", "marker"];

/// Wait for the map and marker libraries; `Map` and `AdvancedMarkerElement`
/// are usable afterwards.
pub async fn import_libraries() -> Result<(), MapError> {
    for name in LIBRARIES {
        let promise = import_library(name).map_err(|e| MapError::Import(describe(&e)))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| MapError::Import(describe(&e)))?;
    }
    Ok(())
}

pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

impl GoogleMap {
    pub fn create(
        container: &HtmlElement,
        center: LatLng,
        zoom: f64,
        map_id: &str,
    ) -> Result<Self, MapError> {
        let options = to_js(&MapOptions {
            zoom,
            center,
            map_id,
        });
        GoogleMap::new(container, &options).map_err(|e| MapError::Import(describe(&e)))
    }

    pub fn draw_flight_path(&self, path: &[LatLng]) {
        let options = to_js(&PolylineOptions {
            geodesic: true,
            path,
            stroke_color: FLIGHT_PATH_COLOR,
            stroke_opacity: FLIGHT_PATH_OPACITY,
            stroke_weight: FLIGHT_PATH_WEIGHT,
        });
        Polyline::new(&options).set_map(self);
    }

    pub fn on_zoom_changed(&self, handler: impl Fn() + 'static) {
        let cb = Closure::<dyn Fn()>::new(handler);
        self.add_listener("zoom_changed", cb.as_ref().unchecked_ref());
        cb.forget();
    }

    /// One-shot `idle` notification, fired once the first frame has rendered.
    pub fn on_ready(&self, handler: impl FnOnce() + 'static) {
        let cb = Closure::once(handler);
        add_listener_once(self.as_ref(), "idle", cb.as_ref().unchecked_ref());
        cb.forget();
    }
}

impl MapSurface for GoogleMap {
    fn zoom(&self) -> Option<f64> {
        self.get_zoom()
    }

    fn recenter(&self, center: LatLng, zoom: f64) {
        self.set_center(&to_js(&center));
        self.set_zoom(zoom);
    }
}

/// A marker on a specific map, so it can be re-attached after hiding.
#[derive(Debug, Clone)]
pub struct PlacedMarker {
    marker: AdvancedMarkerElement,
    map: GoogleMap,
}

impl PlacedMarker {
    pub fn on_click(&self, handler: impl Fn() + 'static) {
        let cb = Closure::<dyn Fn()>::new(handler);
        self.marker
            .add_listener("click", cb.as_ref().unchecked_ref());
        cb.forget();
    }
}

impl MarkerHandle for PlacedMarker {
    type Content = HtmlElement;

    fn set_attached(&self, attached: bool) {
        if attached {
            self.marker.set_map(self.map.as_ref());
        } else {
            self.marker.set_map(&JsValue::NULL);
        }
    }

    fn set_z_index(&self, z_index: Option<i32>) {
        let value = z_index.map(JsValue::from).unwrap_or(JsValue::NULL);
        self.marker.set_z_index(&value);
    }

    fn content(&self) -> Option<HtmlElement> {
        self.marker.content().dyn_into::<HtmlElement>().ok()
    }
}

/// Places markers on one map.
pub struct MarkerPlacer {
    map: GoogleMap,
}

impl MarkerPlacer {
    pub fn new(map: GoogleMap) -> Self {
        Self { map }
    }

    fn place(
        &self,
        position: LatLng,
        title: &str,
        content: Option<&HtmlElement>,
    ) -> PlacedMarker {
        let options = Object::new();
        let _ = Reflect::set(&options, &"map".into(), self.map.as_ref());
        let _ = Reflect::set(&options, &"position".into(), &to_js(&position));
        let _ = Reflect::set(&options, &"title".into(), &title.into());
        if let Some(content) = content {
            let _ = Reflect::set(&options, &"content".into(), content.as_ref());
            let _ = Reflect::set(&options, &"gmpClickable".into(), &JsValue::TRUE);
        }
        PlacedMarker {
            marker: AdvancedMarkerElement::new(&options),
            map: self.map.clone(),
        }
    }
}

impl MarkerFactory for MarkerPlacer {
    type Handle = PlacedMarker;

    fn place_city(&mut self, city: &City) -> PlacedMarker {
        self.place(city.position(), &city.title, None)
    }

    fn place_property(
        &mut self,
        position: LatLng,
        title: &str,
        content: &ElementNode,
    ) -> PlacedMarker {
        let node = dom::render(content);
        self.place(position, title, node.as_ref())
    }
}
