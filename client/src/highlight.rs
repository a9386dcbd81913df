use crate::registry::MarkerEntry;
use crate::surface::{ContentSurface, MarkerHandle};

pub const HIGHLIGHT_CLASS: &str = "highlight";
const RAISED_Z_INDEX: i32 = 1;

/// Flip the highlight on a marker and raise or reset its stacking order.
/// Returns the new highlight state; markers without custom content stay untouched.
pub fn toggle<H: MarkerHandle>(entry: &MarkerEntry<H>) -> bool {
    let Some(content) = entry.handle.content() else {
        return false;
    };
    if content.has_class(HIGHLIGHT_CLASS) {
        content.remove_class(HIGHLIGHT_CLASS);
        entry.handle.set_z_index(None);
        false
    } else {
        content.add_class(HIGHLIGHT_CLASS);
        entry.handle.set_z_index(Some(RAISED_Z_INDEX));
        true
    }
}
