pub const MAP_CONTAINER_ID: &str = "map";
pub const SEARCH_INPUT_ID: &str = "search-box";

pub const DEFAULT_DATA_URL: &str = "./db.json";
pub const DEFAULT_MAP_ID: &str = "4504f8b37365c3d0";

pub const FLIGHT_PATH_COLOR: &str = "#ea67e8";
pub const FLIGHT_PATH_OPACITY: f64 = 1.0;
pub const FLIGHT_PATH_WEIGHT: f64 = 2.0;

/// Runtime settings, read from `data-*` attributes on the app mount element.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub data_url: String,
    pub map_id: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_owned(),
            map_id: DEFAULT_MAP_ID.to_owned(),
        }
    }
}

impl MapConfig {
    /// `attribute` looks up a `data-*` attribute; blank values fall back to defaults.
    pub fn from_attributes(attribute: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str, default: &str| {
            attribute(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };
        Self {
            data_url: read("data-source", DEFAULT_DATA_URL),
            map_id: read("data-map-id", DEFAULT_MAP_ID),
        }
    }

    pub fn from_element(element: &web_sys::Element) -> Self {
        Self::from_attributes(|name| element.get_attribute(name))
    }
}
