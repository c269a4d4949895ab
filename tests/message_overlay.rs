//! Message overlay tests through the update loop

mod common;

use std::time::{Duration, Instant};

use common::{test_model, test_model_with};
use lumen::commands::Cmd;
use lumen::config::ViewerConfig;
use lumen::messages::{AppMsg, MessageMsg, ViewerMsg};
use lumen::model::ViewerModel;
use lumen::update::update;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn send(model: &mut ViewerModel, msg: impl Into<ViewerMsg>, now: Instant) -> Option<Cmd> {
    update(model, msg.into(), now)
}

fn show(text: &str, duration_ms: Option<u64>) -> MessageMsg {
    MessageMsg::Show {
        text: text.to_string(),
        duration_ms,
    }
}

#[test]
fn test_show_then_expire() {
    let t0 = Instant::now();
    let mut model = test_model((200.0, 100.0));

    assert_eq!(send(&mut model, show("Loading…", Some(500)), t0), Some(Cmd::Redraw));
    assert_eq!(model.message.text(), "Loading…");
    assert_eq!(model.next_deadline(), Some(t0 + ms(500)));

    assert_eq!(send(&mut model, AppMsg::Tick, t0 + ms(499)), None);
    assert_eq!(model.message.text(), "Loading…");

    assert_eq!(send(&mut model, AppMsg::Tick, t0 + ms(500)), Some(Cmd::Redraw));
    assert_eq!(model.message.text(), "");
    assert_eq!(model.next_deadline(), None);
}

#[test]
fn test_clear_cancels_pending_hide_and_stays_empty() {
    let t0 = Instant::now();
    let mut model = test_model((200.0, 100.0));

    send(&mut model, show("Loading…", Some(500)), t0);
    assert_eq!(send(&mut model, MessageMsg::Clear, t0 + ms(100)), Some(Cmd::Redraw));
    assert_eq!(model.message.text(), "");
    assert_eq!(model.next_deadline(), None);

    for step in [200, 500, 1000] {
        send(&mut model, AppMsg::Tick, t0 + ms(step));
        assert_eq!(model.message.text(), "");
    }
}

#[test]
fn test_clear_without_message_is_quiet() {
    let mut model = test_model((200.0, 100.0));
    assert_eq!(send(&mut model, MessageMsg::Clear, Instant::now()), None);
}

#[test]
fn test_new_message_supersedes_old_sequence() {
    let t0 = Instant::now();
    let mut model = test_model((200.0, 100.0));

    send(&mut model, show("First", Some(300)), t0);
    send(&mut model, show("Second", Some(1000)), t0 + ms(100));
    assert_eq!(model.message.text(), "Second");

    // The first message's hide would have fired here
    send(&mut model, AppMsg::Tick, t0 + ms(300));
    assert_eq!(model.message.text(), "Second");

    send(&mut model, AppMsg::Tick, t0 + ms(1100));
    assert_eq!(model.message.text(), "");
}

#[test]
fn test_configured_delay_defers_display() {
    let t0 = Instant::now();
    let mut config = ViewerConfig::default();
    config.message.delay_ms = 250;
    let mut model = test_model_with(config, (200.0, 100.0));

    send(&mut model, show("Saved", Some(100)), t0);
    assert!(!model.message.is_visible());
    assert_eq!(model.next_deadline(), Some(t0 + ms(250)));

    assert_eq!(send(&mut model, AppMsg::Tick, t0 + ms(250)), Some(Cmd::Redraw));
    assert_eq!(model.message.text(), "Saved");

    send(&mut model, AppMsg::Tick, t0 + ms(350));
    assert!(!model.message.is_visible());
}

#[test]
fn test_zero_duration_persists_until_cleared() {
    let t0 = Instant::now();
    let mut model = test_model((200.0, 100.0));

    send(&mut model, show("Pinned", Some(0)), t0);
    assert_eq!(model.next_deadline(), None);
    send(&mut model, AppMsg::Tick, t0 + Duration::from_secs(60));
    assert_eq!(model.message.text(), "Pinned");
}
