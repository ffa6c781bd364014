use std::sync::Arc;

use keycap_common::{InputBus, InputEvent, NotificationLevel, OsType, RawKeyEvent};
use keycap_config::ShortcutBinding;

use super::*;
use crate::coordinator::BindingCoordinator;
use crate::testing::MockBackend;

async fn recorder(mock: &Arc<MockBackend>, os: OsType) -> ShortcutRecorder {
    let mut recorder = ShortcutRecorder::new(BindingCoordinator::new(mock.clone()), os);
    recorder.load_bindings().await.unwrap();
    recorder
}

fn down(code: &str) -> InputEvent {
    InputEvent::Key(RawKeyEvent::down(code, ""))
}

fn up(code: &str) -> InputEvent {
    InputEvent::Key(RawKeyEvent::up(code, ""))
}

async fn feed(recorder: &mut ShortcutRecorder, events: Vec<InputEvent>) -> RecordOutcome {
    let mut last = RecordOutcome::Idle;
    for event in events {
        last = recorder.handle_input(event).await;
    }
    last
}

#[tokio::test]
async fn ctrl_shift_space_commits_on_release() {
    let mock = Arc::new(MockBackend::new());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    assert!(rec.start_recording("transcribe", &bus).await);
    assert_eq!(rec.state(), RecorderState::Recording);
    assert_eq!(bus.listener_count(), 1);

    let outcome = feed(
        &mut rec,
        vec![
            down("ControlLeft"),
            down("ShiftLeft"),
            down("Space"),
            up("ShiftLeft"),
            up("Space"),
            up("ControlLeft"),
        ],
    )
    .await;

    let RecordOutcome::Committed(binding) = outcome else {
        panic!("expected commit, got {outcome:?}");
    };
    assert_eq!(binding.current_binding, "ctrl+shift+space");
    assert_eq!(mock.current("transcribe").as_deref(), Some("ctrl+shift+space"));
    assert_eq!(rec.label_for("transcribe").as_deref(), Some("Ctrl + Shift + Space"));
    assert_eq!(rec.state(), RecorderState::Idle);
    assert_eq!(mock.suspend_count(), 1);
    assert_eq!(mock.resume_count(), 1);
    assert_eq!(bus.listener_count(), 0);
}

#[tokio::test]
async fn option_f5_on_macos() {
    let mock = Arc::new(MockBackend::new());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::MacOs).await;

    rec.start_recording("transcribe", &bus).await;
    let outcome = feed(
        &mut rec,
        vec![down("AltLeft"), down("F5"), up("F5"), up("AltLeft")],
    )
    .await;

    assert!(matches!(outcome, RecordOutcome::Committed(ref b) if b.current_binding == "option+f5"));
    assert_eq!(rec.label_for("transcribe").as_deref(), Some("Option + F5"));
}

#[tokio::test]
async fn escape_cancels_and_restores() {
    let mock = Arc::new(MockBackend::new());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    rec.start_recording("transcribe", &bus).await;
    assert_eq!(
        rec.handle_input(down("ControlLeft")).await,
        RecordOutcome::Updated("ctrl".into())
    );
    assert_eq!(rec.label_for("transcribe").as_deref(), Some("Ctrl"));

    assert_eq!(rec.handle_input(down("Escape")).await, RecordOutcome::Cancelled);
    assert!(mock.change_calls().is_empty());
    assert_eq!(rec.label_for("transcribe").as_deref(), Some("Ctrl + Space"));
    assert_eq!(mock.resume_count(), 1);
    assert_eq!(bus.listener_count(), 0);
    assert!(!rec.is_recording());

    // the held ctrl is released after the session ended
    assert_eq!(rec.handle_input(up("ControlLeft")).await, RecordOutcome::Idle);
    assert_eq!(mock.resume_count(), 1);
}

#[tokio::test]
async fn failed_commit_rolls_back() {
    let mock = Arc::new(MockBackend::new().failing_change("ctrl+k"));
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    rec.start_recording("transcribe", &bus).await;
    let outcome = feed(
        &mut rec,
        vec![down("ControlLeft"), down("KeyK"), up("KeyK"), up("ControlLeft")],
    )
    .await;

    assert!(matches!(outcome, RecordOutcome::Failed { rolled_back: true, .. }));
    assert_eq!(
        mock.change_calls(),
        vec!["ctrl+k".to_string(), "ctrl+space".to_string()]
    );
    assert_eq!(
        rec.notifications().titles(NotificationLevel::Error),
        vec![SET_FAILED_TITLE]
    );
    assert_eq!(rec.label_for("transcribe").as_deref(), Some("Ctrl + Space"));
    assert_eq!(mock.resume_count(), 1);
    assert_eq!(bus.listener_count(), 0);
}

#[tokio::test]
async fn failed_rollback_raises_second_notification() {
    let mock = Arc::new(MockBackend::new().failing_all_changes());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    rec.start_recording("transcribe", &bus).await;
    let outcome = feed(
        &mut rec,
        vec![down("ControlLeft"), down("KeyK"), up("ControlLeft"), up("KeyK")],
    )
    .await;

    assert!(matches!(outcome, RecordOutcome::Failed { rolled_back: false, .. }));
    assert_eq!(mock.change_calls().len(), 2);
    assert_eq!(
        rec.notifications().titles(NotificationLevel::Error),
        vec![SET_FAILED_TITLE, RESET_FAILED_TITLE]
    );
    assert_eq!(rec.label_for("transcribe").as_deref(), Some("Ctrl + Space"));
    assert_eq!(mock.resume_count(), 1);
    assert_eq!(rec.state(), RecorderState::Idle);
}

#[tokio::test]
async fn second_start_is_ignored() {
    let mock = Arc::new(MockBackend::new());
    mock.insert(ShortcutBinding::new("paste", "Paste", "", "ctrl+shift+v"));
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    assert!(rec.start_recording("transcribe", &bus).await);
    rec.handle_input(down("KeyA")).await;

    assert!(!rec.start_recording("paste", &bus).await);
    assert!(!rec.start_recording("transcribe", &bus).await);
    assert_eq!(rec.recording_id(), Some("transcribe"));
    assert_eq!(mock.suspend_count(), 1);
    assert_eq!(bus.listener_count(), 1);

    // the first session is untouched
    let outcome = rec.handle_input(up("KeyA")).await;
    assert!(matches!(outcome, RecordOutcome::Committed(ref b) if b.current_binding == "a"));
}

#[tokio::test]
async fn repeats_are_ignored() {
    let mock = Arc::new(MockBackend::new());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    rec.start_recording("transcribe", &bus).await;
    rec.handle_input(down("ControlLeft")).await;
    let repeat = InputEvent::Key(RawKeyEvent::down("ControlLeft", "Control").repeated());
    assert_eq!(rec.handle_input(repeat).await, RecordOutcome::Ignored);

    let outcome = feed(&mut rec, vec![down("KeyG"), up("KeyG"), up("ControlLeft")]).await;
    assert!(matches!(outcome, RecordOutcome::Committed(ref b) if b.current_binding == "ctrl+g"));
}

#[tokio::test]
async fn release_without_press_does_not_commit() {
    let mock = Arc::new(MockBackend::new());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    rec.start_recording("transcribe", &bus).await;
    assert_eq!(rec.handle_input(up("KeyA")).await, RecordOutcome::Ignored);
    assert!(rec.is_recording());
    assert!(mock.change_calls().is_empty());
    assert_eq!(mock.resume_count(), 0);
}

#[tokio::test]
async fn click_outside_and_focus_loss_cancel() {
    for interrupt in [InputEvent::ClickOutside, InputEvent::FocusLost] {
        let mock = Arc::new(MockBackend::new());
        let bus = InputBus::default();
        let mut rec = recorder(&mock, OsType::Linux).await;

        rec.start_recording("transcribe", &bus).await;
        rec.handle_input(down("AltLeft")).await;
        assert_eq!(rec.handle_input(interrupt).await, RecordOutcome::Cancelled);

        assert_eq!(rec.label_for("transcribe").as_deref(), Some("Ctrl + Space"));
        assert_eq!(mock.resume_count(), 1);
        assert_eq!(bus.listener_count(), 0);
    }
}

#[tokio::test]
async fn binding_views_show_live_preview() {
    let mock = Arc::new(MockBackend::new());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Windows).await;

    rec.start_recording("transcribe", &bus).await;
    rec.handle_input(down("MetaLeft")).await;
    rec.handle_input(down("ShiftRight")).await;

    let views = rec.binding_views();
    assert_eq!(views.len(), 1);
    assert!(views[0].recording);
    assert_eq!(views[0].current_binding, "super+shift");
    assert_eq!(views[0].label, "Win + Shift");
    assert_eq!(views[0].name, "Transcribe");
}

#[tokio::test]
async fn run_pumps_the_bus() {
    let mock = Arc::new(MockBackend::new());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    rec.start_recording("transcribe", &bus).await;
    for event in [down("ControlLeft"), down("F9"), up("F9"), up("ControlLeft")] {
        bus.publish(event);
    }
    // queued after the release, never processed
    bus.publish(down("KeyZ"));

    let outcome = rec.run().await;
    assert!(matches!(outcome, RecordOutcome::Committed(ref b) if b.current_binding == "ctrl+f9"));
    assert_eq!(mock.change_calls(), vec!["ctrl+f9".to_string()]);
    assert_eq!(bus.listener_count(), 0);
}

#[tokio::test]
async fn overflowing_the_bus_cancels_instead_of_committing() {
    let mock = Arc::new(MockBackend::new());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    rec.start_recording("transcribe", &bus).await;
    bus.publish(down("ControlLeft"));
    for _ in 0..70 {
        bus.publish(InputEvent::Key(RawKeyEvent::down("ControlLeft", "").repeated()));
    }
    for event in [down("KeyK"), up("KeyK"), up("ControlLeft")] {
        bus.publish(event);
    }

    assert_eq!(rec.run().await, RecordOutcome::Cancelled);
    assert!(mock.change_calls().is_empty());
    assert_eq!(mock.current("transcribe").as_deref(), Some("ctrl+space"));
    assert_eq!(rec.label_for("transcribe").as_deref(), Some("Ctrl + Space"));
    assert_eq!(mock.resume_count(), 1);
    assert_eq!(bus.listener_count(), 0);
}

#[tokio::test]
async fn run_cancels_when_bus_closes() {
    let mock = Arc::new(MockBackend::new());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    rec.start_recording("transcribe", &bus).await;
    bus.publish(down("KeyQ"));
    drop(bus);

    assert_eq!(rec.run().await, RecordOutcome::Cancelled);
    assert_eq!(mock.resume_count(), 1);
}

#[tokio::test]
async fn unknown_binding_does_not_start() {
    let mock = Arc::new(MockBackend::new());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    assert!(!rec.start_recording("nope", &bus).await);
    assert_eq!(mock.suspend_count(), 0);
    assert_eq!(bus.listener_count(), 0);
}

#[tokio::test]
async fn suspend_failure_still_records() {
    let mock = Arc::new(MockBackend::new().failing_suspend());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    assert!(rec.start_recording("transcribe", &bus).await);
    let outcome = feed(&mut rec, vec![down("KeyJ"), up("KeyJ")]).await;
    assert!(matches!(outcome, RecordOutcome::Committed(_)));
    assert_eq!(mock.suspend_count(), 1);
    assert_eq!(mock.resume_count(), 1);
}

#[tokio::test]
async fn cancel_when_idle_is_a_noop() {
    let mock = Arc::new(MockBackend::new());
    let mut rec = recorder(&mock, OsType::Linux).await;
    assert_eq!(rec.cancel().await, RecordOutcome::Idle);
    assert_eq!(mock.resume_count(), 0);
}

#[tokio::test]
async fn removing_the_recording_binding_cancels_first() {
    let mock = Arc::new(MockBackend::new());
    mock.insert(ShortcutBinding::new("paste", "Paste", "", "ctrl+shift+v"));
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    rec.start_recording("paste", &bus).await;
    rec.remove_binding("paste").await.unwrap();

    assert!(!rec.is_recording());
    assert_eq!(mock.resume_count(), 1);
    assert_eq!(bus.listener_count(), 0);
    assert_eq!(rec.bindings().len(), 1);
}

#[tokio::test]
async fn add_and_reset_refresh_the_list() {
    let mock = Arc::new(MockBackend::new());
    let bus = InputBus::default();
    let mut rec = recorder(&mock, OsType::Linux).await;

    let added = rec.add_binding().await.unwrap();
    assert_eq!(rec.bindings().len(), 2);
    assert_eq!(rec.bindings()[0].id, "transcribe");

    rec.start_recording(&added.id, &bus).await;
    feed(&mut rec, vec![down("KeyP"), up("KeyP")]).await;
    assert_eq!(rec.label_for(&added.id).as_deref(), Some("P"));

    rec.reset_binding(&added.id).await.unwrap();
    assert_eq!(rec.label_for(&added.id).as_deref(), Some("Ctrl + Shift + 1"));
}
