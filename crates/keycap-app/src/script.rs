//! JSON input scripts for replaying key events headlessly.
//!
//! A script is an array of [`InputEvent`]s:
//!
//! ```json
//! [
//!   {"type": "Key", "data": {"kind": "down", "code": "ControlLeft"}},
//!   {"type": "Key", "data": {"kind": "up", "code": "ControlLeft"}},
//!   {"type": "FocusLost"}
//! ]
//! ```

use std::path::Path;

use keycap_common::{InputBus, InputEvent, KeycapError, INPUT_BUS_CAPACITY};

pub fn load_script(path: &Path) -> Result<Vec<InputEvent>, KeycapError> {
    let content = std::fs::read_to_string(path)?;
    parse_script(&content)
        .map_err(|e| KeycapError::Other(format!("invalid script {}: {e}", path.display())))
}

pub fn parse_script(content: &str) -> Result<Vec<InputEvent>, serde_json::Error> {
    serde_json::from_str(content)
}

/// A bus large enough to hold the whole script, so a listener that starts
/// reading after [`replay`] has published everything never lags.
pub fn bus_for(events: &[InputEvent]) -> InputBus {
    InputBus::new(events.len().max(INPUT_BUS_CAPACITY))
}

/// Publish every event, then close the bus so listeners see the end.
pub fn replay(bus: InputBus, events: Vec<InputEvent>) {
    let total = events.len();
    for event in events {
        bus.publish(event);
    }
    tracing::debug!(events = total, "script replayed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use keycap_common::{KeyEventKind, RawKeyEvent};
    use std::io::Write;

    #[test]
    fn parse_key_and_interrupt_events() {
        let events = parse_script(
            r#"[
                {"type": "Key", "data": {"kind": "down", "code": "ControlLeft", "key": "Control"}},
                {"type": "Key", "data": {"kind": "up", "code": "KeyA", "repeat": false}},
                {"type": "ClickOutside"},
                {"type": "FocusLost"}
            ]"#,
        )
        .unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            InputEvent::Key(RawKeyEvent::down("ControlLeft", "Control"))
        );
        assert!(matches!(events[1], InputEvent::Key(ref k) if k.kind == KeyEventKind::Up));
        assert_eq!(events[2], InputEvent::ClickOutside);
        assert_eq!(events[3], InputEvent::FocusLost);
    }

    #[test]
    fn rejects_missing_kind() {
        assert!(parse_script(r#"[{"type": "Key", "data": {"code": "KeyA"}}]"#).is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"type": "FocusLost"}}]"#).unwrap();
        let events = load_script(file.path()).unwrap();
        assert_eq!(events, vec![InputEvent::FocusLost]);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_script(Path::new("/nonexistent/keycap-script.json")).unwrap_err();
        assert!(matches!(err, KeycapError::Io(_)));
    }

    #[tokio::test]
    async fn long_script_is_delivered_whole() {
        let events: Vec<InputEvent> = (0..200)
            .map(|_| InputEvent::Key(RawKeyEvent::down("ShiftLeft", "").repeated()))
            .chain([InputEvent::FocusLost])
            .collect();
        let bus = bus_for(&events);
        let mut rx = bus.subscribe();
        replay(bus, events);

        let mut received = 0;
        while let Ok(event) = rx.recv().await {
            received += 1;
            if received == 201 {
                assert_eq!(event, InputEvent::FocusLost);
            }
        }
        assert_eq!(received, 201);
    }

    #[tokio::test]
    async fn replay_closes_the_bus() {
        let bus = InputBus::default();
        let mut rx = bus.subscribe();
        replay(bus, vec![InputEvent::FocusLost]);
        assert_eq!(rx.recv().await.unwrap(), InputEvent::FocusLost);
        assert!(rx.recv().await.is_err());
    }
}
