//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host performs after an update.

use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Repaint the canvas
    Redraw,
    /// Refresh the window title (file name, zoom percent)
    UpdateTitle,
    /// Persist the current configuration
    SaveConfig,
    /// Ask the host to open another file (e.g. the next sibling image)
    OpenPath(PathBuf),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Title changes accompany zoom/image changes but don't repaint by themselves
            Cmd::UpdateTitle => false,
            Cmd::SaveConfig => false,
            // The load that follows produces its own redraw
            Cmd::OpenPath(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Flatten nested batches into a single list, dropping `None`
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }

    /// Redraw plus title refresh, used after zoom and image changes
    pub fn redraw_with_title() -> Self {
        Cmd::Batch(vec![Cmd::Redraw, Cmd::UpdateTitle])
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_redraw() {
        assert!(!Cmd::None.needs_redraw());
        assert!(Cmd::Redraw.needs_redraw());
        assert!(!Cmd::UpdateTitle.needs_redraw());
        assert!(Cmd::redraw_with_title().needs_redraw());
        assert!(!Cmd::batch(vec![Cmd::SaveConfig, Cmd::UpdateTitle]).needs_redraw());
    }

    #[test]
    fn test_flatten_nested_batches() {
        let cmd = Cmd::batch(vec![
            Cmd::None,
            Cmd::redraw_with_title(),
            Cmd::batch(vec![Cmd::SaveConfig]),
        ]);
        assert_eq!(
            cmd.flatten(),
            vec![Cmd::Redraw, Cmd::UpdateTitle, Cmd::SaveConfig]
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Cmd::from(None), Cmd::None);
        assert_eq!(Cmd::from(Some(Cmd::Redraw)), Cmd::Redraw);
    }
}
