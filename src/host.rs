use std::path::{Path, PathBuf};

/// Host capabilities the navigation layer consumes.
///
/// The host owns the side panel, the open documents and whatever global
/// visual marker it shows while navigation mode is on; the controller only
/// calls into these and never reaches around them.
pub trait HostShell {
    /// Ensures the side panel is expanded and visible.
    fn expand_panel(&mut self);
    /// Collapses the side panel.
    fn collapse_panel(&mut self);
    /// Returns `true` if the side panel is currently collapsed or hidden.
    fn panel_collapsed(&self) -> bool;
    /// Path of the document the host currently has focused, if any.
    fn active_document(&self) -> Option<PathBuf>;
    /// Opens the resource at `path`. Returns `false` if the host could not
    /// resolve it.
    fn open_document(&mut self, path: &Path) -> bool;
    /// Installs (`true`) or removes (`false`) the global navigation-mode
    /// marker.
    fn set_mode_marker(&mut self, active: bool);
}
