use std::path::PathBuf;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::debug;

use crate::highlight::ScrollAlign;
use crate::model::PanelModel;
use crate::tree::TreeView;

/// A visible row with its depth, produced in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: usize,
    pub level: u16,
}

/// Widget-side state for a tree panel: the backing model, the collapse set,
/// the selected-row marker and the scroll window.
///
/// Folders are expanded unless present in the collapse set, matching a file
/// explorer that starts fully unfolded.
pub struct TreePanelState {
    model: PanelModel,
    collapsed: FxHashSet<usize>,
    highlighted: Option<usize>,
    offset: usize,
    viewport_rows: usize,
}

impl TreePanelState {
    /// Wraps a model with everything expanded and nothing highlighted.
    pub fn new(model: PanelModel) -> Self {
        Self {
            model,
            collapsed: FxHashSet::default(),
            highlighted: None,
            offset: 0,
            viewport_rows: 0,
        }
    }

    /// The backing model.
    pub const fn model(&self) -> &PanelModel {
        &self.model
    }

    /// Mutable access to the backing model. No caches to invalidate: the
    /// visible rows are recomputed on every query.
    pub const fn model_mut(&mut self) -> &mut PanelModel {
        &mut self.model
    }

    /// The row currently marked selected, if any.
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Current scroll offset in visible rows.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Sets a folder's collapse state directly.
    pub fn set_collapsed(&mut self, id: usize, collapsed: bool) {
        if !self.model.is_folder(id) {
            return;
        }
        if collapsed {
            self.collapsed.insert(id);
        } else {
            self.collapsed.remove(&id);
        }
    }

    /// Visible rows with their depth, for rendering.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::with_capacity(self.model.len());
        let mut stack: SmallVec<[(usize, u16); 16]> = SmallVec::new();
        for &root in self.model.roots().iter().rev() {
            stack.push((root, 0));
        }
        while let Some((id, level)) = stack.pop() {
            rows.push(VisibleRow { id, level });
            // A collapsed folder keeps its own row; only descendants hide.
            if self.model.is_folder(id) && !self.collapsed.contains(&id) {
                for &child in self.model.children(id).iter().rev() {
                    stack.push((child, level + 1));
                }
            }
        }
        rows
    }

    pub(crate) const fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows;
    }

    pub(crate) fn clamp_offset(&mut self, total: usize) {
        let viewport = self.viewport_rows.max(1);
        let max_offset = total.saturating_sub(viewport);
        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

impl TreeView for TreePanelState {
    type Node = usize;

    fn visible_items(&self) -> Vec<usize> {
        self.visible_rows().iter().map(|row| row.id).collect()
    }

    fn is_folder(&self, node: usize) -> bool {
        self.model.is_folder(node)
    }

    fn is_collapsed(&self, node: usize) -> bool {
        self.model.is_folder(node) && self.collapsed.contains(&node)
    }

    fn toggle_collapse(&mut self, node: usize) {
        if !self.model.is_folder(node) {
            return;
        }
        if !self.collapsed.insert(node) {
            self.collapsed.remove(&node);
        }
    }

    fn parent_of(&self, node: usize) -> Option<usize> {
        self.model.parent(node)
    }

    fn path_of(&self, node: usize) -> Option<PathBuf> {
        Some(self.model.path(node).to_path_buf())
    }

    fn activate(&mut self, node: usize) {
        // The widget's own activation affordance: folders toggle, leaves
        // have nothing further at this layer.
        if self.model.is_folder(node) {
            self.toggle_collapse(node);
        } else {
            debug!(node, "native activation on a leaf");
        }
    }

    fn set_highlight(&mut self, node: usize) {
        self.highlighted = Some(node);
    }

    fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    fn scroll_to(&mut self, node: usize, align: ScrollAlign) {
        let rows = self.visible_rows();
        let Some(idx) = rows.iter().position(|row| row.id == node) else {
            return;
        };
        let viewport = self.viewport_rows.max(1);
        match align {
            ScrollAlign::Nearest => {
                if idx < self.offset {
                    self.offset = idx;
                } else if idx >= self.offset + viewport {
                    self.offset = idx + 1 - viewport;
                }
            }
            ScrollAlign::Center => {
                let max_offset = rows.len().saturating_sub(viewport);
                self.offset = idx.saturating_sub(viewport / 2).min(max_offset);
            }
        }
    }

    // Full structural access: collapse hidden folders too, so a later
    // expand does not reveal stale open subtrees.
    fn collapse_all(&mut self) {
        for id in 0..self.model.len() {
            if self.model.is_folder(id) {
                self.collapsed.insert(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    /// `docs/{guides/{a.md}, b.md}, notes.md`
    fn sample_panel() -> TreePanelState {
        let mut model = PanelModel::new();
        let docs = model.add_folder(None, "docs");
        let guides = model.add_folder(Some(docs), "guides");
        model.add_file(Some(guides), "a.md");
        model.add_file(Some(docs), "b.md");
        model.add_file(None, "notes.md");
        TreePanelState::new(model)
    }

    fn visible_names(panel: &TreePanelState) -> Vec<String> {
        panel
            .visible_items()
            .into_iter()
            .map(|id| panel.model().name(id).to_string())
            .collect()
    }

    #[test]
    fn everything_starts_expanded() {
        let panel = sample_panel();
        assert_eq!(
            visible_names(&panel),
            vec!["docs", "guides", "a.md", "b.md", "notes.md"]
        );
    }

    #[test]
    fn collapsed_folder_keeps_its_own_row() {
        let mut panel = sample_panel();
        panel.toggle_collapse(1); // guides

        assert_eq!(visible_names(&panel), vec!["docs", "guides", "b.md", "notes.md"]);
        assert!(panel.is_collapsed(1));
    }

    #[test]
    fn collapsing_an_ancestor_hides_nested_rows() {
        let mut panel = sample_panel();
        panel.toggle_collapse(0); // docs

        assert_eq!(visible_names(&panel), vec!["docs", "notes.md"]);
        // guides is hidden but not itself collapsed.
        assert!(!panel.is_collapsed(1));
    }

    #[test]
    fn levels_follow_nesting_depth() {
        let panel = sample_panel();
        let levels: Vec<u16> = panel.visible_rows().iter().map(|row| row.level).collect();
        assert_eq!(levels, vec![0, 1, 2, 1, 0]);
    }

    #[test]
    fn toggle_on_a_leaf_is_ignored() {
        let mut panel = sample_panel();
        panel.toggle_collapse(4);
        assert!(!panel.is_collapsed(4));
        assert_eq!(visible_names(&panel).len(), 5);
    }

    #[test]
    fn collapse_all_marks_every_folder() {
        let mut panel = sample_panel();
        panel.collapse_all();

        assert_eq!(visible_names(&panel), vec!["docs", "notes.md"]);
        assert!(panel.is_collapsed(0));
        assert!(panel.is_collapsed(1));
    }

    #[test]
    fn paths_resolve_through_the_adapter() {
        let panel = sample_panel();
        assert_eq!(
            panel.path_of(2),
            Some(Path::new("docs/guides/a.md").to_path_buf())
        );
        assert_eq!(panel.parent_of(2), Some(1));
        assert_eq!(panel.parent_of(0), None);
    }

    #[test]
    fn scroll_nearest_moves_by_the_smallest_delta() {
        let mut panel = sample_panel();
        panel.set_viewport_rows(2);

        panel.scroll_to(3, ScrollAlign::Nearest); // "b.md", row 3
        assert_eq!(panel.offset(), 2);

        // Already in view: no movement.
        panel.scroll_to(2, ScrollAlign::Nearest);
        assert_eq!(panel.offset(), 2);

        panel.scroll_to(0, ScrollAlign::Nearest);
        assert_eq!(panel.offset(), 0);
    }

    #[test]
    fn scroll_center_clamps_to_the_valid_range() {
        let mut panel = sample_panel();
        panel.set_viewport_rows(3);

        panel.scroll_to(4, ScrollAlign::Center); // last row
        assert_eq!(panel.offset(), 2);

        panel.scroll_to(0, ScrollAlign::Center);
        assert_eq!(panel.offset(), 0);
    }
}
