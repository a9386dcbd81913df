use estate_map_shared::content::build_property_content;
use estate_map_shared::{City, Dataset, LatLng, Property, find_city};

use crate::animation::AnimationCoordinator;
use crate::error::{DiagnosticSink, MapError};
use crate::highlight;
use crate::registry::{MarkerId, MarkerKind, MarkerRegistry};
use crate::surface::{MapSurface, MarkerFactory, MarkerHandle, Timer, VisibilityWatcher};
use crate::viewport::{self, MARKER_MIN_ZOOM};

pub const SEARCH_ZOOM: f64 = 10.0;

/// What the initial map shows, derived from the dataset alone.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPlan {
    pub center: LatLng,
    pub zoom: f64,
    pub flight_path: Option<Vec<LatLng>>,
}

impl MapPlan {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            center: dataset.map_center(),
            zoom: estate_map_shared::INITIAL_ZOOM,
            flight_path: dataset.flight_path(),
        }
    }
}

/// Owns the map surface, the marker registry and the searchable cities.
pub struct MapController<M, H> {
    map: M,
    registry: MarkerRegistry<H>,
    cities: Vec<City>,
}

impl<M: MapSurface, H: MarkerHandle> MapController<M, H> {
    pub fn new(map: M, cities: Vec<City>) -> Self {
        Self {
            map,
            registry: MarkerRegistry::new(),
            cities,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn registry(&self) -> &MarkerRegistry<H> {
        &self.registry
    }

    pub fn place_cities<F>(&mut self, factory: &mut F) -> usize
    where
        F: MarkerFactory<Handle = H>,
    {
        for city in &self.cities {
            let handle = factory.place_city(city);
            self.registry
                .register(handle, MARKER_MIN_ZOOM, MarkerKind::City);
        }
        self.cities.len()
    }

    /// Place one marker per property with built content and a scheduled
    /// entrance animation. `sample` yields uniform draws in `[0, 1)`.
    pub fn place_properties<F, W, T>(
        &mut self,
        properties: &[Property],
        factory: &mut F,
        animator: &AnimationCoordinator<W, T>,
        mut sample: impl FnMut() -> f64,
    ) -> Vec<MarkerId>
    where
        F: MarkerFactory<Handle = H>,
        W: VisibilityWatcher<H::Content>,
        T: Timer,
    {
        let mut ids = Vec::with_capacity(properties.len());
        for property in properties {
            let content = build_property_content(property);
            let handle = factory.place_property(property.position(), property.title(), &content);
            if let Some(node) = handle.content() {
                animator.schedule(&node, sample());
            }
            ids.push(
                self.registry
                    .register(handle, MARKER_MIN_ZOOM, MarkerKind::Property),
            );
        }
        ids
    }

    /// Re-apply the visibility policy at the map's current zoom.
    pub fn refresh_visibility(&self) -> Option<usize> {
        let zoom = self.map.zoom()?;
        Some(self.apply_zoom(zoom))
    }

    pub fn apply_zoom(&self, zoom: f64) -> usize {
        viewport::update_visibility(zoom, self.registry.all())
    }

    pub fn toggle_highlight(&self, id: MarkerId) -> Option<bool> {
        self.registry.get(id).map(highlight::toggle)
    }

    /// Recenter on a city by title. Misses are reported and leave the map as is.
    pub fn search(&self, query: &str, sink: &dyn DiagnosticSink) -> Result<LatLng, MapError> {
        match find_city(&self.cities, query) {
            Some(city) => {
                let center = city.position();
                self.map.recenter(center, SEARCH_ZOOM);
                Ok(center)
            }
            None => {
                let error = MapError::SearchMiss(query.trim().to_owned());
                sink.report(&error);
                Err(error)
            }
        }
    }
}
