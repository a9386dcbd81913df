use leptos::prelude::*;

use crate::config::{MAP_CONTAINER_ID, MapConfig, SEARCH_INPUT_ID};
use crate::error::{ConsoleSink, DiagnosticSink, MapError};
use crate::session;

pub(crate) const APP_ROOT_ID: &str = "app";

fn try_document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// Settings live as `data-*` attributes on the mount element in `index.html`.
fn app_config() -> MapConfig {
    try_document()
        .and_then(|doc| doc.get_element_by_id(APP_ROOT_ID))
        .map(|el| MapConfig::from_element(&el))
        .unwrap_or_default()
}

fn map_container() -> Option<web_sys::HtmlElement> {
    use wasm_bindgen::JsCast;
    try_document()?
        .get_element_by_id(MAP_CONTAINER_ID)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

/// Root component: search box, status line and the map container.
#[component]
pub fn App() -> impl IntoView {
    let status: RwSignal<Option<String>> = RwSignal::new(Some("Loading map...".into()));
    let started: RwSignal<bool> = RwSignal::new(false);
    let map_session = StoredValue::new_local(None::<session::MapSession>);

    // Start the map once the container is in the document.
    Effect::new(move || {
        if started.get_untracked() {
            return;
        }
        started.set(true);

        let Some(container) = map_container() else {
            let err = MapError::Container(MAP_CONTAINER_ID.into());
            ConsoleSink.report(&err);
            status.set(Some(err.to_string()));
            return;
        };
        let config = app_config();
        wasm_bindgen_futures::spawn_local(async move {
            match session::start(container, config).await {
                Ok(running) => {
                    map_session.set_value(Some(running));
                    status.set(None);
                }
                Err(err) => {
                    ConsoleSink.report(&err);
                    status.set(Some("Map unavailable".into()));
                }
            }
        });
    });

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        let query = event_target_value(&ev);
        map_session.with_value(|running| {
            if let Some(running) = running {
                running.search(&query);
            }
        });
    };

    view! {
        <div class="map-shell">
            <input
                id=SEARCH_INPUT_ID
                class="search-box"
                type="search"
                placeholder="Search a city"
                autocomplete="off"
                on:keydown=on_keydown
            />
            {move || status.get().map(|message| view! { <div class="map-status">{message}</div> })}
            <div id=MAP_CONTAINER_ID class="map"></div>
        </div>
    }
}
