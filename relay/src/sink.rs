use std::{future::Future, sync::Arc};

use tracing::info;

use crate::error::RelayResult;

/// Destination for operational messages, e.g. a chat bot channel
pub trait NotificationSink {
    fn send(&self, channel: &str, message: &str) -> impl Future<Output = RelayResult<()>> + Send;
}

impl<T: NotificationSink + Send + Sync> NotificationSink for Arc<T> {
    fn send(&self, channel: &str, message: &str) -> impl Future<Output = RelayResult<()>> + Send {
        (**self).send(channel, message)
    }
}

/// Writes messages to the log, for local runs without a bot
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn send(&self, channel: &str, message: &str) -> impl Future<Output = RelayResult<()>> + Send {
        info!(channel, "📣 {}", message);
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sink_accepts_everything() {
        assert!(LogSink.send("withdrawals", "hello").await.is_ok());
        assert!(Arc::new(LogSink).send("withdrawals", "").await.is_ok());
    }
}
