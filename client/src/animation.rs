use crate::surface::{ContentSurface, Timer, VisibilityWatcher};

pub const DROP_CLASS: &str = "drop";
/// CSS custom property read by the drop keyframes.
pub const DELAY_PROPERTY: &str = "--delay-time";

const MIN_DELAY_SECS: f64 = 2.0;
const DELAY_SPREAD_SECS: f64 = 1.0;
/// Fallback trigger fires at 30% of the entrance delay.
const FALLBACK_MS_PER_DELAY_SEC: f64 = 300.0;

/// Map a uniform sample in `[0, 1)` onto an entrance delay in `[2, 3)` seconds.
pub fn entrance_delay(sample: f64) -> f64 {
    let sample = if sample.is_finite() {
        sample.clamp(0.0, 1.0 - f64::EPSILON)
    } else {
        0.0
    };
    MIN_DELAY_SECS + sample * DELAY_SPREAD_SECS
}

pub fn fallback_millis(delay_secs: f64) -> u32 {
    (delay_secs * FALLBACK_MS_PER_DELAY_SEC).round() as u32
}

/// Start the drop animation. Adding the class twice is harmless.
pub fn trigger_drop<N: ContentSurface>(node: &N) {
    node.add_class(DROP_CLASS);
}

/// Intersection trigger: drop once, then stop watching the node.
pub fn reveal<N, W>(watcher: &W, node: &N)
where
    N: ContentSurface,
    W: VisibilityWatcher<N> + ?Sized,
{
    trigger_drop(node);
    watcher.unobserve(node);
}

/// Terminal state after the animation: no `drop`, fully opaque.
pub fn settle<N: ContentSurface>(node: &N) {
    node.remove_class(DROP_CLASS);
    node.set_style_property("opacity", "1");
}

/// Staggers the entrance animation of property markers.
pub struct AnimationCoordinator<W, T> {
    watcher: W,
    timer: T,
}

impl<W, T: Timer> AnimationCoordinator<W, T> {
    pub fn new(watcher: W, timer: T) -> Self {
        Self { watcher, timer }
    }

    /// Arm both drop triggers for `node` and return the chosen delay in seconds.
    /// `sample` is a uniform random draw in `[0, 1)`.
    pub fn schedule<N>(&self, node: &N, sample: f64) -> f64
    where
        N: ContentSurface,
        W: VisibilityWatcher<N>,
    {
        let delay = entrance_delay(sample);
        node.set_style_property(DELAY_PROPERTY, &format!("{delay}s"));

        let on_end = node.clone();
        node.on_animation_end(Box::new(move || settle(&on_end)));

        self.watcher.observe(node);

        let fallback = node.clone();
        self.timer.after(
            fallback_millis(delay),
            Box::new(move || trigger_drop(&fallback)),
        );
        delay
    }
}
