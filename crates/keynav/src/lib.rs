#![forbid(unsafe_code)]

//! Roving active-item state machine for keyboard-driven list navigation.
//!
//! keynav tracks which single item of an ordered collection is active,
//! moves that activity in response to decoded navigation commands, skips
//! disabled items, optionally wraps at the ends, and reports changes and
//! list exits through synchronous streams. Items, rendering, and raw input
//! decoding stay on the embedding side: the core sees items only through
//! small capability traits and consumes [`NavCommand`]s, never key events.
//!
//! Three variants share the state machine: [`NavState`] tracks the index
//! only, [`FocusNav`] additionally focuses the newly active item, and
//! [`HighlightNav`] toggles active/inactive styling instead.
//!
//! # Example
//!
//! ```
//! use keynav::{NavCommand, NavState, NavigableItem};
//!
//! struct Entry {
//!     disabled: bool,
//! }
//!
//! impl NavigableItem for Entry {
//!     fn is_disabled(&self) -> bool {
//!         self.disabled
//!     }
//! }
//!
//! let mut items = vec![
//!     Entry { disabled: false },
//!     Entry { disabled: true },
//!     Entry { disabled: false },
//! ];
//! let mut nav = NavState::new().with_wrap(true);
//!
//! nav.set_first_active(&mut items);
//! assert_eq!(nav.active_index(), Some(0));
//!
//! // The disabled entry is skipped.
//! nav.dispatch(&mut items, NavCommand::Next);
//! assert_eq!(nav.active_index(), Some(2));
//!
//! // Wrap mode steps past the end back to the start.
//! nav.dispatch(&mut items, NavCommand::Next);
//! assert_eq!(nav.active_index(), Some(0));
//! ```

pub mod activation;
pub mod command;
pub mod item;
pub mod nav;
pub mod source;
pub mod stream;

pub use activation::{Activation, FocusActivation, HighlightActivation, NoActivation};
pub use command::NavCommand;
pub use item::{Focusable, Highlightable, NavigableItem};
pub use nav::{FocusNav, HighlightNav, NavState};
pub use source::ItemSource;
pub use stream::{EventStream, Subscription};
