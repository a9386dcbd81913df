#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::HtmlElement;

use crate::animation::AnimationCoordinator;
use crate::config::MapConfig;
use crate::controller::{MapController, MapPlan};
use crate::dom::{self, BrowserTimer, DomWatcher};
use crate::error::{ConsoleSink, MapError};
use crate::geolocation;
use crate::loader;
use crate::maps::{self, GoogleMap, MarkerPlacer, PlacedMarker};
use crate::registry::MarkerKind;

type BrowserController = MapController<GoogleMap, PlacedMarker>;

/// A running map. Listeners share the controller with this handle.
#[derive(Clone)]
pub struct MapSession {
    controller: Rc<RefCell<BrowserController>>,
}

impl MapSession {
    /// Run a city search against the live map. Misses go to the console.
    pub fn search(&self, query: &str) {
        if let Ok(controller) = self.controller.try_borrow() {
            let _ = controller.search(query, &ConsoleSink);
        }
    }
}

/// Load the data, build the map and wire every listener. Nothing is placed on
/// the map until both the data and the maps libraries are available.
pub async fn start(container: HtmlElement, config: MapConfig) -> Result<MapSession, MapError> {
    let dataset = loader::fetch_dataset(&config.data_url).await?;
    maps::import_libraries().await?;

    let plan = MapPlan::from_dataset(&dataset);
    let map = GoogleMap::create(&container, plan.center, plan.zoom, &config.map_id)?;
    let watcher = DomWatcher::new().map_err(|e| MapError::Import(maps::describe(&e)))?;

    let controller = Rc::new(RefCell::new(MapController::new(
        map.clone(),
        dataset.cities,
    )));
    let mut placer = MarkerPlacer::new(map.clone());
    let city_count = controller.borrow_mut().place_cities(&mut placer);
    if let Some(path) = plan.flight_path.as_deref() {
        map.draw_flight_path(path);
    }
    controller.borrow().refresh_visibility();

    let on_zoom = controller.clone();
    map.on_zoom_changed(move || {
        if let Ok(controller) = on_zoom.try_borrow() {
            controller.refresh_visibility();
        }
    });

    let properties = dataset.properties;
    let on_ready = controller.clone();
    map.on_ready(move || {
        let animator = AnimationCoordinator::new(watcher, BrowserTimer);
        let ids = on_ready.borrow_mut().place_properties(
            &properties,
            &mut placer,
            &animator,
            dom::random_sample,
        );
        for id in ids {
            let handle = on_ready
                .borrow()
                .registry()
                .get(id)
                .map(|entry| entry.handle.clone());
            let Some(handle) = handle else {
                continue;
            };
            let on_click = on_ready.clone();
            handle.on_click(move || {
                if let Ok(controller) = on_click.try_borrow() {
                    controller.toggle_highlight(id);
                }
            });
        }
        let controller = on_ready.borrow();
        controller.refresh_visibility();
        let placed = controller.registry().count(MarkerKind::Property);
        web_sys::console::info_1(&format!("Placed {placed} property markers").into());
    });

    geolocation::locate(|pos| {
        web_sys::console::info_1(
            &format!("Current user position: {}, {}", pos.lat, pos.lng).into(),
        );
    });

    web_sys::console::info_1(&format!("Map ready with {city_count} cities").into());
    Ok(MapSession { controller })
}
