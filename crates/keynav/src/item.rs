#![forbid(unsafe_code)]

//! Item capability traits.
//!
//! Items stay opaque to the tracker: it only ever asks whether an item may
//! be visited, and — through the activation strategies — tells an item to
//! take focus or restyle itself. Each capability is its own trait so a
//! collection type only implements what its variant needs.

/// An item that navigation scans can visit.
///
/// Disabled items are skipped by every scan operation. The default is
/// enabled, so item types without a disabled notion implement this trait
/// with an empty body.
pub trait NavigableItem {
    /// Whether navigation scans skip this item.
    fn is_disabled(&self) -> bool {
        false
    }
}

/// An item that can receive input focus.
pub trait Focusable: NavigableItem {
    /// Give this item input focus.
    fn focus(&mut self);
}

/// An item that renders distinct active and inactive visual states.
pub trait Highlightable: NavigableItem {
    /// Apply the active-item styling.
    fn set_active_styles(&mut self);

    /// Apply the inactive styling.
    fn set_inactive_styles(&mut self);
}
