use std::{future::Future, sync::Arc};

use tokio::sync::watch;

/// Teardown signal shared by a view and the calls it starts.
///
/// Cancelling does not abort the request itself; it guarantees that a result
/// arriving after teardown is dropped instead of applied.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    state: Arc<watch::Sender<bool>>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Drives `fut` unless the token is cancelled first.
    ///
    /// Returns `None` when the token was already cancelled or got cancelled
    /// before `fut` completed.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => None,
            out = fut => (!self.is_cancelled()).then_some(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_passes_result_through() {
        let token = CancellationToken::new();
        assert_eq!(token.run(async { 42 }).await, Some(42));
    }

    #[tokio::test]
    async fn run_skips_future_after_cancel() {
        let token = CancellationToken::new();
        token.cancel();

        let mut polled = false;
        let out = token.run(async { polled = true }).await;
        assert!(out.is_none());
        assert!(!polled);
    }

    #[tokio::test]
    async fn cancel_while_pending_discards_result() {
        let token = CancellationToken::new();
        let pending = token.run(std::future::pending::<u8>());
        let (out, ()) = tokio::join!(pending, async { token.cancel() });
        assert_eq!(out, None);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        token.cancelled().await;
    }
}
