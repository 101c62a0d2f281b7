//! Keystroke debouncing for autocomplete.
//!
//! Each schedule spawns a timer task racing a cancellation token
//! against a sleep. Both outcomes report back over the widget channel,
//! so the event loop's in-flight accounting stays exact either way.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::controller::Msg;

#[derive(Default)]
pub(crate) struct Debouncer {
    pending: Option<CancellationToken>,
}

impl Debouncer {
    /// Cancel the pending timer, if any. The timer task still sends
    /// its cancellation notice.
    pub(crate) fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Replace any pending timer with a fresh one for `query`.
    pub(crate) fn schedule(
        &mut self,
        tx: UnboundedSender<Msg>,
        generation: u64,
        query: String,
        delay: Duration,
    ) {
        self.cancel();
        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    let _ = tx.send(Msg::DebounceCancelled);
                }
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(Msg::DebounceFired { generation, query });
                }
            }
        });
    }
}
