use std::hash::Hash;
use std::path::PathBuf;

use crate::highlight::ScrollAlign;

/// Adapter contract over the host's tree widget.
///
/// Implementations derive everything from the widget's current structure
/// rather than caching session state: the visible list must be recomputed on
/// every call because any collapse toggle shifts row indices.
pub trait TreeView {
    /// Row handle. Must stay stable while the row exists.
    type Node: Copy + Eq + Hash;

    /// Currently rendered rows in display order. A row is included unless it
    /// sits below a collapsed folder row; the collapsed folder's own row
    /// stays visible.
    fn visible_items(&self) -> Vec<Self::Node>;
    /// Returns `true` if the row is a folder.
    fn is_folder(&self, node: Self::Node) -> bool;
    /// Returns `true` if the folder row is collapsed. Leaves report `false`.
    fn is_collapsed(&self, node: Self::Node) -> bool;
    /// Invokes the widget's expand/collapse affordance for the row.
    fn toggle_collapse(&mut self, node: Self::Node);
    /// Nearest enclosing folder row, or `None` at the top level.
    fn parent_of(&self, node: Self::Node) -> Option<Self::Node>;
    /// The row's stable external identifier, if it has one.
    fn path_of(&self, node: Self::Node) -> Option<PathBuf>;
    /// The widget's native activation, used when a leaf has no resolvable
    /// path to open through the host.
    fn activate(&mut self, node: Self::Node);

    /// Marks the row as selected.
    fn set_highlight(&mut self, node: Self::Node);
    /// Removes the selected marker wherever it is.
    fn clear_highlight(&mut self);
    /// Brings the row into the viewport.
    fn scroll_to(&mut self, node: Self::Node, align: ScrollAlign);

    /// Collapses every expanded folder row.
    ///
    /// The provided implementation re-scans the visible rows and toggles
    /// each expanded folder until none remain visible. Adapters with full
    /// structural access should override it to collapse hidden folders too.
    fn collapse_all(&mut self) {
        loop {
            let expanded: Vec<Self::Node> = self
                .visible_items()
                .into_iter()
                .filter(|&node| self.is_folder(node) && !self.is_collapsed(node))
                .collect();
            if expanded.is_empty() {
                break;
            }
            for node in expanded {
                self.toggle_collapse(node);
            }
        }
    }
}
