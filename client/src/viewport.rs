use crate::registry::MarkerEntry;
use crate::surface::MarkerHandle;

/// Zoom level markers must exceed before they are shown.
pub const MARKER_MIN_ZOOM: f64 = 10.0;

/// A marker is shown only while the map is zoomed in strictly past its threshold.
pub fn is_visible_at(zoom: f64, threshold: f64) -> bool {
    zoom > threshold
}

/// Attach or detach every marker for the given zoom level.
/// Returns how many markers ended up attached.
pub fn update_visibility<'a, H, I>(zoom: f64, entries: I) -> usize
where
    H: MarkerHandle + 'a,
    I: IntoIterator<Item = &'a MarkerEntry<H>>,
{
    let mut attached = 0;
    for entry in entries {
        let visible = is_visible_at(zoom, entry.threshold);
        entry.handle.set_attached(visible);
        attached += usize::from(visible);
    }
    attached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MarkerKind, MarkerRegistry};
    use crate::testing::MockMarker;

    #[test]
    fn threshold_is_strict() {
        assert!(!is_visible_at(10.0, 10.0));
        assert!(is_visible_at(10.5, 10.0));
        assert!(!is_visible_at(6.0, 10.0));
        assert!(!is_visible_at(f64::NAN, 10.0));
    }

    #[test]
    fn attaches_iff_zoom_exceeds_each_threshold() {
        let mut registry = MarkerRegistry::new();
        let low = MockMarker::plain("low");
        let high = MockMarker::plain("high");
        registry.register(low.clone(), 8.0, MarkerKind::City);
        registry.register(high.clone(), MARKER_MIN_ZOOM, MarkerKind::Property);

        for zoom in 0..=22 {
            let zoom = zoom as f64;
            let attached = update_visibility(zoom, registry.all());
            assert_eq!(low.is_attached(), zoom > 8.0, "zoom {zoom}");
            assert_eq!(high.is_attached(), zoom > MARKER_MIN_ZOOM, "zoom {zoom}");
            assert_eq!(
                attached,
                usize::from(zoom > 8.0) + usize::from(zoom > MARKER_MIN_ZOOM)
            );
        }
    }

    #[test]
    fn empty_registry_is_a_no_op() {
        let registry: MarkerRegistry<MockMarker> = MarkerRegistry::new();
        assert_eq!(update_visibility(12.0, registry.all()), 0);
    }
}
