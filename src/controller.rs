use std::hash::Hash;
use std::time::{Duration, Instant};

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::action::{NavCommand, NavEvent, NavKey};
use crate::chord::{ChordFamily, ChordOutcome, ChordState};
use crate::highlight::Highlighter;
use crate::host::HostShell;
use crate::tree::TreeView;

/// Delay before re-querying the tree after a structural change, giving the
/// widget time to settle.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Delay before re-checking panel visibility after a layout change.
pub const LAYOUT_RECHECK_DELAY: Duration = Duration::from_millis(10);

/// Deferred continuation kinds.
///
/// Entries are fire-and-forget: deactivation inside a window does not cancel
/// them, so each one re-validates state when it runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    /// Complete `activate` once the panel has settled.
    FinishActivation,
    /// Recompute the visible list, clamp the cursor, re-highlight.
    RefreshClamp,
    /// Recompute the visible list and re-highlight at the same index.
    Refresh,
    /// Reset the cursor to the first row and re-highlight.
    ResetToTop,
    /// Re-check whether the panel collapsed after a layout change.
    RecheckPanel,
    /// Deactivate after the host's own panel toggle has run.
    Deactivate,
}

/// Modal navigation session over a tree side panel.
///
/// Owns the activation flag, the selection cursor, the chord machine and the
/// settle-deferral queue. Everything runs on the host's single event thread:
/// the host forwards key events via [`handle_key`](Self::handle_key) while
/// the mode is active and drives pending deferrals by calling
/// [`tick`](Self::tick) with the current time.
///
/// The visible list is never cached across commands; every handler asks the
/// tree for the current rows and clamps the cursor against them.
pub struct NavController<Id> {
    active: bool,
    index: usize,
    chord: ChordState,
    queue: SmallVec<[(Instant, Deferred); 4]>,
    highlight: Highlighter<Id>,
}

impl<Id: Copy + Eq + Hash> Default for NavController<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Copy + Eq + Hash> NavController<Id> {
    /// Creates an inactive session.
    pub fn new() -> Self {
        Self {
            active: false,
            index: 0,
            chord: ChordState::Idle,
            queue: SmallVec::new(),
            highlight: Highlighter::new(),
        }
    }

    /// Returns `true` while navigation mode is on.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Current cursor position within the visible list.
    pub const fn cursor(&self) -> usize {
        self.index
    }

    /// The row currently marked selected, if any.
    pub const fn highlighted(&self) -> Option<Id> {
        self.highlight.current()
    }

    /// Number of settle deferrals not yet run.
    pub fn pending_deferrals(&self) -> usize {
        self.queue.len()
    }

    /// Host-registered activation command: toggles navigation mode, and
    /// collapses the panel when turning it off.
    pub fn toggle_mode<T, H>(&mut self, tree: &mut T, host: &mut H, now: Instant)
    where
        T: TreeView<Node = Id>,
        H: HostShell,
    {
        if self.active {
            self.deactivate(tree, host);
            host.collapse_panel();
        } else {
            self.activate(host, now);
        }
    }

    /// Requests the panel and defers activation until it has settled.
    ///
    /// Completion runs from [`tick`](Self::tick): if the panel still shows
    /// no rows by then, activation is aborted with a log line and the mode
    /// stays off.
    pub fn activate<H: HostShell>(&mut self, host: &mut H, now: Instant) {
        host.expand_panel();
        self.queue
            .push((now + SETTLE_DELAY, Deferred::FinishActivation));
    }

    /// Leaves navigation mode: clears the mode marker, the highlight, the
    /// chord machine and the cursor. Idempotent.
    pub fn deactivate<T, H>(&mut self, tree: &mut T, host: &mut H)
    where
        T: TreeView<Node = Id>,
        H: HostShell,
    {
        self.active = false;
        self.index = 0;
        self.chord = ChordState::Idle;
        host.set_mode_marker(false);
        self.highlight.clear(tree);
    }

    /// Deactivates and drops any queued deferrals.
    ///
    /// For the host's unload hook; a fresh session can still be started with
    /// [`activate`](Self::activate) afterwards.
    pub fn teardown<T, H>(&mut self, tree: &mut T, host: &mut H)
    where
        T: TreeView<Node = Id>,
        H: HostShell,
    {
        self.queue.clear();
        self.deactivate(tree, host);
        debug!("navigation session torn down");
    }

    /// Offers one key press to the controller.
    ///
    /// Returns [`NavEvent::Handled`] when the key belongs to the navigation
    /// table (the host must stop its own processing of the event) and
    /// [`NavEvent::Passthrough`] otherwise. Escape deactivates but is left
    /// for the host to process as usual, and an empty panel turns every key
    /// into a passthrough.
    pub fn handle_key<T, H>(
        &mut self,
        tree: &mut T,
        host: &mut H,
        key: NavKey,
        now: Instant,
    ) -> NavEvent
    where
        T: TreeView<Node = Id>,
        H: HostShell,
    {
        if !self.active {
            return NavEvent::Passthrough;
        }
        if key == NavKey::Escape {
            self.deactivate(tree, host);
            return NavEvent::Passthrough;
        }
        if tree.visible_items().is_empty() {
            return NavEvent::Passthrough;
        }

        match self.chord.note(key, now) {
            ChordOutcome::Fired(ChordFamily::JumpTop) => {
                return self.handle_command(tree, host, NavCommand::JumpTop, now);
            }
            ChordOutcome::Fired(ChordFamily::CollapseAll) => {
                return self.handle_command(tree, host, NavCommand::CollapseAllReset, now);
            }
            ChordOutcome::Armed | ChordOutcome::Swallowed => return NavEvent::Handled,
            ChordOutcome::Pass => {}
        }

        NavCommand::for_key(key).map_or(NavEvent::Passthrough, |cmd| {
            self.handle_command(tree, host, cmd, now)
        })
    }

    /// Applies one command from the fixed table against the current visible
    /// list. Public so applications can drive navigation programmatically.
    pub fn handle_command<T, H>(
        &mut self,
        tree: &mut T,
        host: &mut H,
        cmd: NavCommand,
        now: Instant,
    ) -> NavEvent
    where
        T: TreeView<Node = Id>,
        H: HostShell,
    {
        if !self.active {
            return NavEvent::Passthrough;
        }
        let items = tree.visible_items();
        let Some(last) = items.len().checked_sub(1) else {
            return NavEvent::Passthrough;
        };
        // Any earlier mutation may have shifted or shortened the list.
        self.index = self.index.min(last);

        match cmd {
            NavCommand::MoveDown => {
                self.index = (self.index + 1).min(last);
                self.highlight.select(tree, items[self.index]);
            }
            NavCommand::MoveUp => {
                self.index = self.index.saturating_sub(1);
                self.highlight.select(tree, items[self.index]);
            }
            NavCommand::JumpTop => {
                self.index = 0;
                self.highlight.select(tree, items[0]);
            }
            NavCommand::JumpBottom => {
                self.index = last;
                self.highlight.select(tree, items[last]);
            }
            NavCommand::OpenOrExpand => {
                self.open_or_expand(tree, host, items[self.index], now);
            }
            NavCommand::CollapseOrAscend => {
                self.collapse_or_ascend(tree, items[self.index], now);
            }
            NavCommand::CollapseAllReset => {
                tree.collapse_all();
                self.queue.push((now + SETTLE_DELAY, Deferred::ResetToTop));
            }
        }
        NavEvent::Handled
    }

    /// A click landed outside the panel while navigation mode was on.
    pub fn on_click_outside<T, H>(&mut self, tree: &mut T, host: &mut H)
    where
        T: TreeView<Node = Id>,
        H: HostShell,
    {
        if self.active {
            self.deactivate(tree, host);
        }
    }

    /// The host reported a layout change; panel visibility is re-checked
    /// shortly after, once the layout has settled.
    pub fn on_layout_change(&mut self, now: Instant) {
        if self.active {
            self.queue
                .push((now + LAYOUT_RECHECK_DELAY, Deferred::RecheckPanel));
        }
    }

    /// The host reported a resize; a collapsed panel ends the session.
    pub fn on_resize<T, H>(&mut self, tree: &mut T, host: &mut H)
    where
        T: TreeView<Node = Id>,
        H: HostShell,
    {
        if self.active && host.panel_collapsed() {
            self.deactivate(tree, host);
        }
    }

    /// The host's own panel-toggle chord was observed. Deactivation waits
    /// long enough for the host's toggle to run first.
    pub fn on_panel_toggle(&mut self, now: Instant) {
        if self.active {
            self.queue.push((now + SETTLE_DELAY, Deferred::Deactivate));
        }
    }

    /// Runs every settle deferral that has come due.
    pub fn tick<T, H>(&mut self, tree: &mut T, host: &mut H, now: Instant)
    where
        T: TreeView<Node = Id>,
        H: HostShell,
    {
        let mut i = 0;
        while i < self.queue.len() {
            if self.queue[i].0 <= now {
                let (_, job) = self.queue.remove(i);
                self.run_deferred(tree, host, job);
            } else {
                i += 1;
            }
        }
    }

    fn run_deferred<T, H>(&mut self, tree: &mut T, host: &mut H, job: Deferred)
    where
        T: TreeView<Node = Id>,
        H: HostShell,
    {
        match job {
            Deferred::FinishActivation => self.finish_activation(tree, host),
            Deferred::RefreshClamp => {
                if !self.active {
                    return;
                }
                let items = tree.visible_items();
                if let Some(last) = items.len().checked_sub(1) {
                    self.index = self.index.min(last);
                    self.highlight.select(tree, items[self.index]);
                } else {
                    self.highlight.clear(tree);
                }
            }
            Deferred::Refresh => {
                if !self.active {
                    return;
                }
                let items = tree.visible_items();
                if let Some(&node) = items.get(self.index) {
                    self.highlight.select(tree, node);
                }
            }
            Deferred::ResetToTop => {
                if !self.active {
                    return;
                }
                self.index = 0;
                let items = tree.visible_items();
                if let Some(&first) = items.first() {
                    self.highlight.select(tree, first);
                }
            }
            Deferred::RecheckPanel => {
                if self.active && host.panel_collapsed() {
                    self.deactivate(tree, host);
                }
            }
            Deferred::Deactivate => self.deactivate(tree, host),
        }
    }

    // The one deferral that does not re-check `active`: it is the step that
    // sets the flag.
    fn finish_activation<T, H>(&mut self, tree: &mut T, host: &mut H)
    where
        T: TreeView<Node = Id>,
        H: HostShell,
    {
        let items = tree.visible_items();
        let Some(last) = items.len().checked_sub(1) else {
            debug!("activation aborted: panel has no visible rows");
            return;
        };
        self.active = true;
        host.set_mode_marker(true);
        if let Some(open) = host.active_document()
            && let Some(idx) = items
                .iter()
                .position(|&node| tree.path_of(node).is_some_and(|path| path == open))
        {
            self.index = idx;
        }
        self.index = self.index.min(last);
        self.highlight.select(tree, items[self.index]);
    }

    fn open_or_expand<T, H>(&mut self, tree: &mut T, host: &mut H, node: Id, now: Instant)
    where
        T: TreeView<Node = Id>,
        H: HostShell,
    {
        if tree.is_folder(node) {
            tree.toggle_collapse(node);
            self.queue.push((now + SETTLE_DELAY, Deferred::RefreshClamp));
        } else if let Some(path) = tree.path_of(node) {
            if !host.open_document(&path) {
                warn!(path = %path.display(), "host could not open document");
            }
            self.deactivate(tree, host);
        } else {
            debug!("selected row has no path, falling back to native activation");
            tree.activate(node);
            self.deactivate(tree, host);
        }
    }

    fn collapse_or_ascend<T>(&mut self, tree: &mut T, node: Id, now: Instant)
    where
        T: TreeView<Node = Id>,
    {
        if tree.is_folder(node) && !tree.is_collapsed(node) {
            tree.toggle_collapse(node);
            // The collapsed folder keeps its own row, so the cursor stays
            // put; no re-anchoring to the parent.
            self.queue.push((now + SETTLE_DELAY, Deferred::Refresh));
        } else if let Some(parent) = tree.parent_of(node) {
            let items = tree.visible_items();
            if let Some(idx) = items.iter().position(|&n| n == parent) {
                self.index = idx;
                self.highlight.select(tree, parent);
            }
        } else {
            trace!("cursor already at top level");
        }
    }
}
