//! Composite notifier: forwards each message to every configured sink.

use async_trait::async_trait;
use std::sync::Arc;

use super::Notifier;

pub struct CompositeNotifier {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl CompositeNotifier {
    pub fn new(sinks: Vec<Arc<dyn Notifier>>) -> Self {
        Self { sinks }
    }

    /// Names of the wrapped sinks, in delivery order.
    pub fn channels(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }
}

#[async_trait]
impl Notifier for CompositeNotifier {
    async fn notify(&self, message: &str) {
        for sink in &self.sinks {
            sink.notify(message).await;
        }
    }

    fn name(&self) -> &'static str {
        "composite"
    }
}
