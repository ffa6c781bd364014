use keycap_common::{InputBus, InputEvent};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

/// Why a subscription stopped yielding events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The listener fell behind and this many events were dropped. The
    /// key state seen so far can no longer be trusted.
    Lagged(u64),
    /// Every publisher is gone.
    Closed,
}

/// A live listener on the [`InputBus`], released when dropped.
///
/// Capture sessions hold one of these only while they are active; dropping
/// it is what takes the session off the input stream.
pub struct InputSubscription {
    receiver: broadcast::Receiver<InputEvent>,
}

impl InputSubscription {
    pub fn new(bus: &InputBus) -> Self {
        debug!("input subscription opened");
        Self {
            receiver: bus.subscribe(),
        }
    }

    pub async fn next(&mut self) -> Result<InputEvent, StreamEnd> {
        match self.receiver.recv().await {
            Ok(event) => Ok(event),
            Err(RecvError::Lagged(n)) => {
                warn!(skipped = n, "input subscription lagged");
                Err(StreamEnd::Lagged(n))
            }
            Err(RecvError::Closed) => Err(StreamEnd::Closed),
        }
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        debug!("input subscription closed");
    }
}
