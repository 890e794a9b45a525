//! Modal vim-style keyboard navigation for tree side panels in ratatui apps.
//!
//! The core is a navigation session ([`NavController`]) over an abstract
//! tree adapter ([`TreeView`]): movement keys (`j`/`k`/`h`/`l`), two-key
//! chords (`gg`, `zM`) with a timing window, and activation scoped to the
//! host's panel lifecycle. A concrete adapter ([`TreePanelState`] rendered
//! by [`TreePanel`]) provides a file-tree panel backed by [`PanelModel`].
//!
//! Feature flags:
//! - `keymap`: crossterm-based key decoding (`decode_nav`, `decode_global`).

mod action;
mod chord;
mod controller;
mod highlight;
mod host;
#[cfg(feature = "keymap")]
mod keymap;
mod model;
mod panel;
pub mod prelude;
mod tree;
mod widget;

pub use action::{NavCommand, NavEvent, NavKey};
pub use chord::{CHORD_WINDOW, ChordFamily, ChordOutcome, ChordState};
pub use controller::{LAYOUT_RECHECK_DELAY, NavController, SETTLE_DELAY};
pub use highlight::{Highlighter, ScrollAlign};
pub use host::HostShell;
#[cfg(feature = "keymap")]
pub use keymap::{GlobalChord, decode_global, decode_nav};
pub use model::PanelModel;
pub use panel::{TreePanelState, VisibleRow};
pub use tree::TreeView;
pub use widget::{PanelGlyphs, PanelStyle, TreePanel};
