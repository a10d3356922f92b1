#![forbid(unsafe_code)]

//! Active-item tracking and command dispatch.
//!
//! [`NavState`] owns one active index over an externally owned
//! [`ItemSource`], moves it in response to [`NavCommand`]s, skips disabled
//! items, optionally wraps at the ends, and reports changes through
//! synchronous streams.
//!
//! # Invariants
//!
//! 1. After any completed scan operation the index is `None` or points to
//!    an item whose `is_disabled()` is `false`. (`set_active_index` is
//!    exempt: it is explicit placement and performs no disabled check.)
//! 2. The change stream fires iff the index actually changed; the exit
//!    stream fires exactly once per dispatched `Exit`.
//! 3. Exactly one deactivate/activate pair runs per index change, after the
//!    index is committed, outgoing item first.
//! 4. No operation caches the source length across calls; every operation
//!    re-reads it on entry.
//!
//! # Failure Modes
//!
//! - Out-of-range indices, stale indices left behind by out-of-band item
//!   removal, empty sources, and fully disabled sources all degrade to
//!   silent no-ops. Navigation input never produces an error.

use crate::activation::{Activation, FocusActivation, HighlightActivation, NoActivation};
use crate::command::NavCommand;
use crate::item::NavigableItem;
use crate::source::ItemSource;
use crate::stream::{EventStream, Subscription};

/// Tracks the active item of a list and drives it from navigation commands.
///
/// The activation side effect `A` runs on every committed index change; see
/// [`Activation`]. [`FocusNav`] and [`HighlightNav`] are the two effectful
/// specializations; a plain `NavState` tracks the index only.
///
/// The item source is passed into every operation rather than owned, so the
/// embedding layer stays free to add and remove items between commands.
#[derive(Debug)]
pub struct NavState<A = NoActivation> {
    active: Option<usize>,
    wrap: bool,
    activation: A,
    changes: EventStream<usize>,
    exits: EventStream<()>,
}

/// Tracker that focuses each newly active item.
pub type FocusNav = NavState<FocusActivation>;

/// Tracker that toggles active/inactive styling as the index moves.
pub type HighlightNav = NavState<HighlightActivation>;

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavState {
    /// Create an index-only tracker with no activation side effect.
    #[must_use]
    pub fn new() -> Self {
        Self::with_activation(NoActivation)
    }
}

impl FocusNav {
    /// Create a tracker that focuses each newly active item.
    #[must_use]
    pub fn focusing() -> Self {
        Self::with_activation(FocusActivation)
    }
}

impl HighlightNav {
    /// Create a tracker that restyles items as the active index moves.
    #[must_use]
    pub fn highlighting() -> Self {
        Self::with_activation(HighlightActivation)
    }
}

impl<A> NavState<A> {
    /// Create a tracker with a custom activation side effect.
    #[must_use]
    pub fn with_activation(activation: A) -> Self {
        Self {
            active: None,
            wrap: false,
            activation,
            changes: EventStream::new(),
            exits: EventStream::new(),
        }
    }

    /// Set whether directional steps wrap past the ends. Off by default.
    #[must_use]
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Index of the active item, or `None` when nothing is active.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Whether directional steps wrap past the ends.
    #[must_use]
    pub const fn wraps(&self) -> bool {
        self.wrap
    }

    /// The active item, or `None` when idle or when the index no longer
    /// resolves in `items`.
    pub fn active_item<'s, S>(&self, items: &'s S) -> Option<&'s S::Item>
    where
        S: ItemSource + ?Sized,
    {
        self.active.and_then(|index| items.get(index))
    }

    /// Subscribe to index changes. The callback receives the new index.
    pub fn on_change(&self, callback: impl Fn(&usize) + 'static) -> Subscription {
        self.changes.subscribe(callback)
    }

    /// Subscribe to exit notifications, raised once per dispatched
    /// [`NavCommand::Exit`].
    pub fn on_exit(&self, callback: impl Fn(&()) + 'static) -> Subscription {
        self.exits.subscribe(callback)
    }

    /// Route a decoded command to the matching operation.
    ///
    /// `Exit` emits one exit notification and leaves the index untouched.
    /// Returns `true` when the triggering input belongs to the tracker and
    /// should be consumed by the caller; `Exit` returns `false` so the
    /// input keeps its platform meaning.
    pub fn dispatch<S>(&mut self, items: &mut S, command: NavCommand) -> bool
    where
        S: ItemSource + ?Sized,
        S::Item: NavigableItem,
        A: Activation<S::Item>,
    {
        match command {
            NavCommand::Next => {
                self.set_next_active(items);
            }
            NavCommand::Previous => {
                self.set_previous_active(items);
            }
            NavCommand::First => {
                self.set_first_active(items);
            }
            NavCommand::Last => {
                self.set_last_active(items);
            }
            NavCommand::Exit => {
                self.exits.emit(&());
                #[cfg(feature = "tracing")]
                self.log_active("exit");
            }
        }
        command.consumes_input()
    }

    /// Activate the item at `index` without a disabled check.
    ///
    /// Explicit placement for callers that know where activity belongs.
    /// Out-of-range indices are ignored. Returns `true` if the index
    /// changed.
    pub fn set_active_index<S>(&mut self, items: &mut S, index: usize) -> bool
    where
        S: ItemSource + ?Sized,
        A: Activation<S::Item>,
    {
        if index >= items.len() {
            return false;
        }
        self.commit(items, index, "set_active_index")
    }

    /// Update the index without running the activation side effect.
    ///
    /// For callers whose item-side state is already in sync, e.g. the
    /// platform reported the focus move itself. The change stream still
    /// fires. Out-of-range indices are ignored.
    pub fn sync_active_index<S>(&mut self, items: &S, index: usize) -> bool
    where
        S: ItemSource + ?Sized,
    {
        if index >= items.len() || self.active == Some(index) {
            return false;
        }
        self.active = Some(index);
        #[cfg(feature = "tracing")]
        self.log_active("sync_active_index");
        self.changes.emit(&index);
        true
    }

    /// Activate the first enabled item. No enabled item: no change.
    pub fn set_first_active<S>(&mut self, items: &mut S) -> bool
    where
        S: ItemSource + ?Sized,
        S::Item: NavigableItem,
        A: Activation<S::Item>,
    {
        let len = items.len();
        (0..len)
            .find(|&index| is_enabled(items, index))
            .is_some_and(|index| self.commit(items, index, "set_first_active"))
    }

    /// Activate the last enabled item. No enabled item: no change.
    pub fn set_last_active<S>(&mut self, items: &mut S) -> bool
    where
        S: ItemSource + ?Sized,
        S::Item: NavigableItem,
        A: Activation<S::Item>,
    {
        let len = items.len();
        (0..len)
            .rev()
            .find(|&index| is_enabled(items, index))
            .is_some_and(|index| self.commit(items, index, "set_last_active"))
    }

    /// Step forward to the next enabled item.
    ///
    /// With wrap off the scan stops at the end (no clamping: if nothing
    /// enabled remains ahead, the index stays put). With wrap on the scan
    /// continues from the start for at most one full lap.
    pub fn set_next_active<S>(&mut self, items: &mut S) -> bool
    where
        S: ItemSource + ?Sized,
        S::Item: NavigableItem,
        A: Activation<S::Item>,
    {
        self.seek(items, 1, "set_next_active")
    }

    /// Step backward to the previous enabled item. Same wrap and
    /// disabled-skip rules as [`set_next_active`](Self::set_next_active).
    pub fn set_previous_active<S>(&mut self, items: &mut S) -> bool
    where
        S: ItemSource + ?Sized,
        S::Item: NavigableItem,
        A: Activation<S::Item>,
    {
        self.seek(items, -1, "set_previous_active")
    }

    /// Walk `delta` at a time from the current anchor until an enabled item
    /// is found.
    ///
    /// Wrap mode reduces the cursor modulo the current length and gives up
    /// after one full lap, so a fully disabled source terminates with no
    /// change. The lap re-examines the anchor index last; landing on it is
    /// a same-index commit and therefore silent.
    fn seek<S>(&mut self, items: &mut S, delta: isize, action: &'static str) -> bool
    where
        S: ItemSource + ?Sized,
        S::Item: NavigableItem,
        A: Activation<S::Item>,
    {
        let len = items.len() as isize;
        if len == 0 {
            return false;
        }
        // Idle scans enter at the ends: index 0 going forward, the last
        // index going backward.
        let anchor = match self.active {
            Some(index) => index as isize,
            None if delta > 0 => -1,
            None => len,
        };
        let mut cursor = anchor + delta;
        for _ in 0..len {
            if self.wrap {
                cursor = cursor.rem_euclid(len);
            } else if cursor < 0 || cursor >= len {
                return false;
            }
            let index = cursor as usize;
            if is_enabled(items, index) {
                return self.commit(items, index, action);
            }
            cursor += delta;
        }
        false
    }

    /// Commit `index` as active: update state, run the activation pair,
    /// notify. Same-index commits are silent no-ops.
    fn commit<S>(&mut self, items: &mut S, index: usize, action: &'static str) -> bool
    where
        S: ItemSource + ?Sized,
        A: Activation<S::Item>,
    {
        #[cfg(not(feature = "tracing"))]
        let _ = action;

        let previous = self.active;
        if previous == Some(index) {
            return false;
        }
        self.active = Some(index);

        // Deactivate-then-activate, so an item never observes the calls in
        // the reverse order. An outgoing index that no longer resolves
        // (items removed out-of-band) is skipped.
        if let Some(prev_index) = previous
            && let Some(item) = items.get_mut(prev_index)
        {
            self.activation.deactivate(item);
        }
        if let Some(item) = items.get_mut(index) {
            self.activation.activate(item);
        }

        #[cfg(feature = "tracing")]
        self.log_active(action);
        self.changes.emit(&index);
        true
    }

    #[cfg(feature = "tracing")]
    fn log_active(&self, action: &'static str) {
        tracing::debug!(
            message = "keynav.active",
            action,
            index = self.active,
            wrap = self.wrap
        );
    }
}

fn is_enabled<S>(items: &S, index: usize) -> bool
where
    S: ItemSource + ?Sized,
    S::Item: NavigableItem,
{
    items.get(index).is_some_and(|item| !item.is_disabled())
}
