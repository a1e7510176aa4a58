//! Console notifier: writes each message to the log stream.

use async_trait::async_trait;
use tracing::info;

use super::Notifier;

#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, message: &str) {
        info!(target: "rusk_monitor::notification", "{message}");
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
