pub mod content;
pub mod geo;
pub mod listing;
pub mod search;

pub use content::{ContentNode, ElementNode, build_property_content};
pub use geo::{LatLng, PartialLatLng, resolve_position};
pub use listing::{City, Dataset, DisplayValue, INITIAL_ZOOM, Property};
pub use search::find_city;
