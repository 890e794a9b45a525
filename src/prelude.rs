pub use crate::{
    CHORD_WINDOW, ChordFamily, ChordOutcome, ChordState, Highlighter, HostShell,
    LAYOUT_RECHECK_DELAY, NavCommand, NavController, NavEvent, NavKey, PanelGlyphs, PanelModel,
    PanelStyle, SETTLE_DELAY, ScrollAlign, TreePanel, TreePanelState, TreeView, VisibleRow,
};

#[cfg(feature = "keymap")]
pub use crate::{GlobalChord, decode_global, decode_nav};
