//! Run-level cancellation.
//!
//! A [`ShutdownTrigger`] is fired by Ctrl-C or the run deadline. Stages hold a
//! [`Shutdown`] and stop dispatching new work once it fires; work already in
//! flight finishes on its own timeouts.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    token: CancellationToken,
}

#[derive(Debug, Clone)]
pub struct Shutdown {
    token: CancellationToken,
}

pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let token = CancellationToken::new();
    (
        ShutdownTrigger {
            token: token.clone(),
        },
        Shutdown { token },
    )
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// Fires the trigger once `deadline` has elapsed.
    pub fn trigger_after(&self, deadline: Duration) {
        let trigger = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = trigger.token.cancelled() => {}
                _ = tokio::time::sleep(deadline) => {
                    warn!(
                        "Run timeout of {}s reached, no new hosts will be validated",
                        deadline.as_secs()
                    );
                    trigger.trigger();
                }
            }
        });
    }
}

impl Shutdown {
    /// A handle nobody can fire.
    pub fn never() -> Self {
        channel().1
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes once the trigger has fired.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_wakes_waiters() {
        let (trigger, shutdown) = channel();
        assert!(!shutdown.is_triggered());

        trigger.trigger();

        tokio::time::timeout(Duration::from_secs(1), shutdown.cancelled())
            .await
            .expect("cancelled() should complete after trigger");
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn never_stays_pending() {
        let shutdown = Shutdown::never();
        let waited = tokio::time::timeout(Duration::from_millis(50), shutdown.cancelled()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_triggered());
    }

    #[tokio::test]
    async fn trigger_after_fires_on_deadline() {
        let (trigger, shutdown) = channel();
        trigger.trigger_after(Duration::from_millis(20));

        tokio::time::timeout(Duration::from_secs(2), shutdown.cancelled())
            .await
            .expect("deadline should fire the trigger");
    }
}
