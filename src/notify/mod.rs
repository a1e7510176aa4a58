//! Notification sinks.
//!
//! Defines the `Notifier` trait and provides implementations for:
//! - Console: mirrors messages into the log stream
//! - Telegram: Bot API `sendMessage`
//! - Composite: fans a message out to several sinks

pub mod composite;
pub mod console;
pub mod telegram;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::NotificationsConfig;
pub use composite::CompositeNotifier;
pub use console::ConsoleNotifier;
pub use telegram::TelegramNotifier;

/// Fire-and-forget message delivery.
///
/// Implementors log their own delivery failures; callers never see them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str);

    /// Channel name for logging.
    fn name(&self) -> &'static str;
}

/// Assemble the configured sinks into one notifier.
///
/// Telegram is added only when both its env vars resolve. With nothing
/// configured, the console sink is used so messages are never dropped
/// silently.
pub fn build_notifier(cfg: &NotificationsConfig) -> CompositeNotifier {
    let mut sinks: Vec<Arc<dyn Notifier>> = Vec::new();

    if cfg.console {
        sinks.push(Arc::new(ConsoleNotifier::new()));
    }

    match (
        cfg.telegram_bot_token_env.as_deref(),
        cfg.telegram_chat_id_env.as_deref(),
    ) {
        (Some(token_env), Some(chat_env)) => match TelegramNotifier::from_env(token_env, chat_env) {
            Ok(telegram) => sinks.push(Arc::new(telegram)),
            Err(e) => warn!(error = %e, "Telegram notifications disabled"),
        },
        (None, None) => {}
        _ => warn!("Telegram needs both telegram_bot_token_env and telegram_chat_id_env"),
    }

    if sinks.is_empty() {
        info!("No notification channel configured, falling back to console");
        sinks.push(Arc::new(ConsoleNotifier::new()));
    }

    let notifier = CompositeNotifier::new(sinks);
    info!(channels = ?notifier.channels(), "Notifier ready");
    notifier
}
