/// A key press from the host's input surface, reduced to what navigation
/// mode consumes. Characters are case-sensitive (`g` and `G` are distinct).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    /// A printable character.
    Char(char),
    /// The Enter/Return key.
    Enter,
    /// The Escape key.
    Escape,
}

/// Commands in the fixed navigation table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    /// Move the cursor down one row, clamped at the last item.
    MoveDown,
    /// Move the cursor up one row, clamped at the first item.
    MoveUp,
    /// Toggle the folder under the cursor, or open a leaf and leave
    /// navigation mode.
    OpenOrExpand,
    /// Collapse the expanded folder under the cursor, or move the cursor to
    /// the row's parent.
    CollapseOrAscend,
    /// Jump the cursor to the first visible row.
    JumpTop,
    /// Jump the cursor to the last visible row.
    JumpBottom,
    /// Collapse every folder, then reset the cursor to the top.
    CollapseAllReset,
}

impl NavCommand {
    /// Resolves a single-key command. Chord keys (`g`, `z`, `M`) belong to
    /// the chord machine and resolve to `None` here.
    pub(crate) const fn for_key(key: NavKey) -> Option<Self> {
        match key {
            NavKey::Char('j') => Some(Self::MoveDown),
            NavKey::Char('k') => Some(Self::MoveUp),
            NavKey::Char('l') | NavKey::Enter => Some(Self::OpenOrExpand),
            NavKey::Char('h') => Some(Self::CollapseOrAscend),
            NavKey::Char('G') => Some(Self::JumpBottom),
            _ => None,
        }
    }
}

/// Disposition of a key event offered to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavEvent {
    /// The key was consumed; the host must suppress its own handling of the
    /// event.
    Handled,
    /// Not ours; the host processes the key as usual.
    Passthrough,
}
