//! Tracing infrastructure for development diagnostics
//!
//! Provides structured logging with module-level filtering for debugging
//! viewport transforms, backend switches and animation state.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=lumen::viewport=trace` - transform recomputes only
//! - `RUST_LOG=lumen::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/lumen-viewer/logs/lumen.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::backend::BackendKind;
use crate::model::ViewerModel;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. File logging
/// writes to `~/.config/lumen-viewer/logs/lumen.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "lumen.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of viewer state for diffing around an update
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSnapshot {
    pub zoom: f64,
    pub manual_zoom: bool,
    pub src: (f64, f64, f64, f64),
    pub animating: bool,
    pub backend: BackendKind,
    pub message: String,
}

impl ViewerSnapshot {
    pub fn from_model(model: &ViewerModel) -> Self {
        let src = model.viewport.src;
        Self {
            zoom: model.viewport.zoom,
            manual_zoom: model.viewport.manual_zoom,
            src: (src.x, src.y, src.width, src.height),
            animating: model.animation.is_animating(),
            backend: model.active_backend(),
            message: model.message.text().to_string(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &ViewerSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.zoom != other.zoom {
            changes.push(format!("zoom: {:.4} → {:.4}", self.zoom, other.zoom));
        }
        if self.manual_zoom != other.manual_zoom {
            changes.push(format!("manual: {}", other.manual_zoom));
        }
        if self.src != other.src {
            let (x, y, w, h) = other.src;
            changes.push(format!("src: ({:.1},{:.1} {:.1}x{:.1})", x, y, w, h));
        }
        if self.animating != other.animating {
            let status = if other.animating { "started" } else { "stopped" };
            changes.push(format!("animation {}", status));
        }
        if self.backend != other.backend {
            changes.push(format!("backend: {:?} → {:?}", self.backend, other.backend));
        }
        if self.message != other.message {
            changes.push(format!("message: {:?}", other.message));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::geometry::Size;
    use crate::theme::ViewerTheme;

    #[test]
    fn test_diff_reports_zoom_and_message() {
        let mut model = ViewerModel::new(
            ViewerConfig::default(),
            ViewerTheme::default(),
            Size::new(10.0, 10.0),
        );
        let before = ViewerSnapshot::from_model(&model);
        assert_eq!(before.diff(&before), None);

        model.viewport.zoom = 2.0;
        let after = ViewerSnapshot::from_model(&model);
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("zoom: 1.0000 → 2.0000"));
        assert!(!diff.contains("message"));
    }
}
