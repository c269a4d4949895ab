//! On-canvas message handlers

use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::messages::MessageMsg;
use crate::model::ViewerModel;

pub fn update_message(model: &mut ViewerModel, msg: MessageMsg, now: Instant) -> Option<Cmd> {
    match msg {
        MessageMsg::Show { text, duration_ms } => {
            show_message(model, text, duration_ms, now);
            Some(Cmd::Redraw)
        }
        MessageMsg::Clear => {
            let was_visible = model.message.clear();
            was_visible.then_some(Cmd::Redraw)
        }
    }
}

/// Show `text` with the configured delay, replacing any pending message
pub(crate) fn show_message(
    model: &mut ViewerModel,
    text: impl Into<String>,
    duration_ms: Option<u64>,
    now: Instant,
) {
    let delay = Duration::from_millis(model.config.message.delay_ms);
    let duration = Duration::from_millis(duration_ms.unwrap_or(model.config.message.duration_ms));
    model.message.show(text, delay, duration, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::geometry::Size;
    use crate::theme::ViewerTheme;

    #[test]
    fn test_show_uses_configured_duration() {
        let t0 = Instant::now();
        let mut config = ViewerConfig::default();
        config.message.duration_ms = 300;
        let mut model = ViewerModel::new(config, ViewerTheme::default(), Size::new(10.0, 10.0));

        update_message(
            &mut model,
            MessageMsg::Show {
                text: "Saved".into(),
                duration_ms: None,
            },
            t0,
        );
        assert_eq!(model.message.text(), "Saved");

        model.message.poll(t0 + Duration::from_millis(300));
        assert_eq!(model.message.text(), "");
    }

    #[test]
    fn test_clear_cancels_pending_message() {
        let t0 = Instant::now();
        let mut model = ViewerModel::new(
            ViewerConfig::default(),
            ViewerTheme::default(),
            Size::new(10.0, 10.0),
        );
        model.config.message.delay_ms = 50;
        update_message(
            &mut model,
            MessageMsg::Show {
                text: "Later".into(),
                duration_ms: Some(0),
            },
            t0,
        );
        assert_eq!(model.message.text(), "");

        update_message(&mut model, MessageMsg::Clear, t0);
        model.message.poll(t0 + Duration::from_millis(60));
        assert_eq!(model.message.text(), "");
    }
}
