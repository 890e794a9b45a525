use std::time::{Duration, Instant};

use crate::action::NavKey;

/// The second key of a chord must arrive strictly within this window of the
/// first.
pub const CHORD_WINDOW: Duration = Duration::from_millis(500);

/// The two-key chord families.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChordFamily {
    /// `g` `g`: jump the cursor to the first visible row.
    JumpTop,
    /// `z` `M`: collapse every folder and reset the cursor.
    CollapseAll,
}

/// Chord machine: idle, or armed for one family until a deadline.
///
/// Only one pending chord is tracked. A first key of another family
/// overwrites the pending one; any non-chord key resets to idle without
/// firing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChordState {
    #[default]
    Idle,
    Armed {
        family: ChordFamily,
        deadline: Instant,
    },
}

/// What a key press did to the chord machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChordOutcome {
    /// A chord completed within its window.
    Fired(ChordFamily),
    /// The key armed (or re-armed) a chord; consume it and wait.
    Armed,
    /// A chord key with nothing to complete (`M` with no pending `z`);
    /// consumed, no effect.
    Swallowed,
    /// Not a chord key. The machine reset and the key is free for the
    /// single-key table.
    Pass,
}

impl ChordState {
    /// Feeds one key into the machine.
    pub fn note(&mut self, key: NavKey, now: Instant) -> ChordOutcome {
        let armed = match *self {
            Self::Armed { family, deadline } if now < deadline => Some(family),
            _ => None,
        };
        match key {
            NavKey::Char('g') => {
                if armed == Some(ChordFamily::JumpTop) {
                    *self = Self::Idle;
                    ChordOutcome::Fired(ChordFamily::JumpTop)
                } else {
                    // A late second `g` lands here and becomes a fresh first
                    // key.
                    *self = Self::Armed {
                        family: ChordFamily::JumpTop,
                        deadline: now + CHORD_WINDOW,
                    };
                    ChordOutcome::Armed
                }
            }
            NavKey::Char('z') => {
                *self = Self::Armed {
                    family: ChordFamily::CollapseAll,
                    deadline: now + CHORD_WINDOW,
                };
                ChordOutcome::Armed
            }
            NavKey::Char('M') => {
                *self = Self::Idle;
                if armed == Some(ChordFamily::CollapseAll) {
                    ChordOutcome::Fired(ChordFamily::CollapseAll)
                } else {
                    ChordOutcome::Swallowed
                }
            }
            _ => {
                *self = Self::Idle;
                ChordOutcome::Pass
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_g_within_window_fires() {
        let t0 = Instant::now();
        let mut chord = ChordState::Idle;

        assert_eq!(chord.note(NavKey::Char('g'), t0), ChordOutcome::Armed);
        assert_eq!(
            chord.note(NavKey::Char('g'), t0 + Duration::from_millis(400)),
            ChordOutcome::Fired(ChordFamily::JumpTop)
        );
        assert_eq!(chord, ChordState::Idle);
    }

    #[test]
    fn late_second_g_rearms_instead_of_firing() {
        let t0 = Instant::now();
        let mut chord = ChordState::Idle;

        chord.note(NavKey::Char('g'), t0);
        let late = t0 + Duration::from_millis(600);
        assert_eq!(chord.note(NavKey::Char('g'), late), ChordOutcome::Armed);
        // The late press armed a fresh chord, so a quick third press fires.
        assert_eq!(
            chord.note(NavKey::Char('g'), late + Duration::from_millis(100)),
            ChordOutcome::Fired(ChordFamily::JumpTop)
        );
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let t0 = Instant::now();
        let mut chord = ChordState::Idle;

        chord.note(NavKey::Char('g'), t0);
        assert_eq!(
            chord.note(NavKey::Char('g'), t0 + CHORD_WINDOW),
            ChordOutcome::Armed
        );
    }

    #[test]
    fn z_then_m_fires_collapse_all() {
        let t0 = Instant::now();
        let mut chord = ChordState::Idle;

        assert_eq!(chord.note(NavKey::Char('z'), t0), ChordOutcome::Armed);
        assert_eq!(
            chord.note(NavKey::Char('M'), t0 + Duration::from_millis(100)),
            ChordOutcome::Fired(ChordFamily::CollapseAll)
        );
    }

    #[test]
    fn bare_m_is_swallowed() {
        let t0 = Instant::now();
        let mut chord = ChordState::Idle;

        assert_eq!(chord.note(NavKey::Char('M'), t0), ChordOutcome::Swallowed);
        assert_eq!(chord, ChordState::Idle);
    }

    #[test]
    fn new_family_overwrites_pending_chord() {
        let t0 = Instant::now();
        let mut chord = ChordState::Idle;

        chord.note(NavKey::Char('g'), t0);
        chord.note(NavKey::Char('z'), t0 + Duration::from_millis(100));
        // The pending `g` is gone; `M` completes the `z` chord.
        assert_eq!(
            chord.note(NavKey::Char('M'), t0 + Duration::from_millis(200)),
            ChordOutcome::Fired(ChordFamily::CollapseAll)
        );
    }

    #[test]
    fn unrelated_key_resets_pending_chord() {
        let t0 = Instant::now();
        let mut chord = ChordState::Idle;

        chord.note(NavKey::Char('g'), t0);
        assert_eq!(
            chord.note(NavKey::Char('j'), t0 + Duration::from_millis(100)),
            ChordOutcome::Pass
        );
        // The reset means this `g` arms rather than fires.
        assert_eq!(
            chord.note(NavKey::Char('g'), t0 + Duration::from_millis(200)),
            ChordOutcome::Armed
        );
    }
}
