//! Collaborator seams between the marker controller and the browser.
//!
//! The controller only ever talks to these traits. `maps.rs` and `dom.rs`
//! implement them on top of Google Maps and `web_sys`; tests use the mocks in
//! `testing.rs`.

use estate_map_shared::{City, ElementNode, LatLng};

/// The map widget itself.
pub trait MapSurface {
    /// Current zoom, or `None` before the widget has settled.
    fn zoom(&self) -> Option<f64>;
    fn recenter(&self, center: LatLng, zoom: f64);
}

/// A marker placed on the map. Cloning yields another reference to the same
/// widget-owned marker.
pub trait MarkerHandle: Clone {
    type Content: ContentSurface;

    fn set_attached(&self, attached: bool);
    /// `None` resets to the widget's default stacking.
    fn set_z_index(&self, z_index: Option<i32>);
    /// Custom content node, if the marker was created with one.
    fn content(&self) -> Option<Self::Content>;
}

/// A rendered node whose class list and inline style the controller mutates.
pub trait ContentSurface: Clone + 'static {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn set_style_property(&self, name: &str, value: &str);
    /// Runs `handler` each time a CSS animation on this node finishes.
    fn on_animation_end(&self, handler: Box<dyn Fn()>);
}

/// Reports when a node first scrolls into view.
pub trait VisibilityWatcher<N> {
    fn observe(&self, node: &N);
    fn unobserve(&self, node: &N);
}

/// One-shot, fire-and-forget timer.
pub trait Timer {
    fn after(&self, millis: u32, task: Box<dyn FnOnce()>);
}

/// Creates markers on the map.
pub trait MarkerFactory {
    type Handle: MarkerHandle;

    fn place_city(&mut self, city: &City) -> Self::Handle;
    fn place_property(
        &mut self,
        position: LatLng,
        title: &str,
        content: &ElementNode,
    ) -> Self::Handle;
}
