use flag_rewards::WithdrawalRequested;
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
    time::{sleep, timeout},
};
use tracing::{debug, info, warn};

use crate::{
    config::RelayConfig,
    error::{RelayError, RelayResult},
    decoder::decode_withdrawal_log,
    message::withdrawal_message,
    sink::NotificationSink,
};

/// Counters returned by the worker once every sender is dropped
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: u64,
    pub dropped: u64,
}

/// Send one message, retrying with linear backoff.
/// Returns the number of attempts used on success.
pub async fn deliver_with_retry<S: NotificationSink>(
    sink: &S,
    config: &RelayConfig,
    message: &str,
) -> RelayResult<u32> {
    let attempts = config.max_retries.saturating_add(1);
    let mut attempt = 1;

    loop {
        let outcome = match timeout(config.attempt_timeout, sink.send(&config.channel, message)).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::Timeout(config.attempt_timeout)),
        };

        match outcome {
            Ok(()) => return Ok(attempt),
            Err(err) if attempt >= attempts => {
                return Err(RelayError::Exhausted {
                    attempts,
                    last: Box::new(err),
                });
            }
            Err(err) => {
                let delay = config.backoff_for(attempt);
                debug!(attempt, ?delay, %err, "notification attempt failed, retrying");
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Handle for queueing withdrawal notifications off the request path
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::Sender<WithdrawalRequested>,
}

impl Notifier {
    /// Start the delivery worker. It stops after every `Notifier` clone is dropped.
    pub fn spawn<S>(config: RelayConfig, sink: S) -> (Self, JoinHandle<DispatchStats>)
    where
        S: NotificationSink + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let handle = tokio::spawn(run_worker(rx, config, sink));
        (Self { tx }, handle)
    }

    /// Queue a notification without waiting for delivery
    pub fn notify(&self, event: WithdrawalRequested) -> RelayResult<()> {
        self.tx.try_send(event).map_err(|err| match err {
            TrySendError::Full(event) => {
                warn!(sequence = event.sequence, external_id = event.external_id, "notification queue full, dropping");
                RelayError::QueueFull
            }
            TrySendError::Closed(_) => RelayError::QueueClosed,
        })
    }

    /// Queue every `WithdrawalRequested` found in a committed transaction's logs.
    /// Returns how many were queued; undecodable lines are logged and skipped.
    pub fn notify_from_logs<I, S>(&self, logs: I) -> RelayResult<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut queued = 0;
        for line in logs {
            match decode_withdrawal_log(line.as_ref()) {
                Ok(Some(event)) => {
                    self.notify(event)?;
                    queued += 1;
                }
                Ok(None) => {}
                Err(err) => warn!(%err, "skipping program data line"),
            }
        }
        Ok(queued)
    }
}

async fn run_worker<S: NotificationSink>(
    mut rx: mpsc::Receiver<WithdrawalRequested>,
    config: RelayConfig,
    sink: S,
) -> DispatchStats {
    let mut stats = DispatchStats::default();

    while let Some(event) = rx.recv().await {
        let message = withdrawal_message(&event);
        match deliver_with_retry(&sink, &config, &message).await {
            Ok(attempts) => {
                stats.delivered += 1;
                info!(sequence = event.sequence, external_id = event.external_id, attempts, "✅ withdrawal notification sent");
            }
            Err(err) => {
                // The withdrawal itself is already committed.
                stats.dropped += 1;
                warn!(sequence = event.sequence, external_id = event.external_id, %err, "withdrawal notification dropped");
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::{prelude::Pubkey, Event};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use std::{
        future::Future,
        sync::{
            atomic::{AtomicU32, Ordering},
            Arc, Mutex,
        },
        time::Duration,
    };
    use tokio::time::Instant;

    /// Fails the first `failures` calls, then records what it receives
    #[derive(Default)]
    struct FlakySink {
        failures: AtomicU32,
        calls: AtomicU32,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl FlakySink {
        fn failing(failures: u32) -> Self {
            Self {
                failures: AtomicU32::new(failures),
                ..Default::default()
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl NotificationSink for FlakySink {
        fn send(&self, channel: &str, message: &str) -> impl Future<Output = RelayResult<()>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let fail = self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
                .is_ok();
            if !fail {
                self.sent
                    .lock()
                    .unwrap()
                    .push((channel.to_string(), message.to_string()));
            }
            async move {
                if fail {
                    Err(RelayError::Sink("502 Bad Gateway".to_string()))
                } else {
                    Ok(())
                }
            }
        }
    }

    struct HangingSink;

    impl NotificationSink for HangingSink {
        fn send(&self, _channel: &str, _message: &str) -> impl Future<Output = RelayResult<()>> + Send {
            std::future::pending()
        }
    }

    fn event(sequence: u64) -> WithdrawalRequested {
        WithdrawalRequested {
            player: Pubkey::new_unique(),
            external_id: 77,
            request: Pubkey::new_unique(),
            sequence,
            amount: 15_000,
            remaining_balance: 0,
            created_at: 1_700_000_000,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_then_success() {
        let sink = FlakySink::failing(2);
        let config = RelayConfig::default();
        let started = Instant::now();

        let attempts = deliver_with_retry(&sink, &config, "hi").await.unwrap();

        assert_eq!(attempts, 3);
        assert_eq!(sink.calls(), 3);
        // 2s then 4s
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(6) && elapsed < Duration::from_secs(7));
        assert_eq!(sink.sent.lock().unwrap()[0], ("withdrawals".to_string(), "hi".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_are_bounded() {
        let sink = FlakySink::failing(10);
        let config = RelayConfig::default();

        let err = deliver_with_retry(&sink, &config, "hi").await.unwrap_err();

        assert!(matches!(err, RelayError::Exhausted { attempts: 3, .. }));
        assert_eq!(sink.calls(), 3);
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_sink_times_out() {
        let config = RelayConfig {
            max_retries: 1,
            ..Default::default()
        };

        let err = deliver_with_retry(&HangingSink, &config, "hi").await.unwrap_err();

        match err {
            RelayError::Exhausted { attempts, last } => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, RelayError::Timeout(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_survives_failed_delivery() {
        // First event burns all three attempts, second goes through
        let sink = Arc::new(FlakySink::failing(3));
        let (notifier, handle) = Notifier::spawn(RelayConfig::default(), sink.clone());

        notifier.notify(event(0)).unwrap();
        notifier.notify(event(1)).unwrap();
        drop(notifier);

        let stats = handle.await.unwrap();
        assert_eq!(stats, DispatchStats { delivered: 1, dropped: 1 });

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("#1"));
        assert!(sent[0].1.contains("₱150.00"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transaction_logs_feed_the_queue() {
        let sink = Arc::new(FlakySink::default());
        let (notifier, handle) = Notifier::spawn(RelayConfig::default(), sink.clone());

        let withdrawal = event(4);
        let logs = vec![
            "Program 8PJ1EM4M6oBxAYyguNiZE67nYnv5MjAe8SAjdxK79YCT invoke [1]".to_string(),
            "Program log: 💸 Withdrawal #4 requested".to_string(),
            format!("Program data: {}", STANDARD.encode(withdrawal.data())),
            "Program data: !!!".to_string(),
            "Program 8PJ1EM4M6oBxAYyguNiZE67nYnv5MjAe8SAjdxK79YCT success".to_string(),
        ];

        assert_eq!(notifier.notify_from_logs(&logs).unwrap(), 1);
        drop(notifier);

        let stats = handle.await.unwrap();
        assert_eq!(stats, DispatchStats { delivered: 1, dropped: 0 });
        let sent = sink.sent.lock().unwrap();
        assert!(sent[0].1.contains("#4"));
        assert!(sent[0].1.contains("₱150.00"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_queue_does_not_block() {
        let config = RelayConfig {
            queue_capacity: 1,
            ..Default::default()
        };
        let (notifier, handle) = Notifier::spawn(config, HangingSink);

        notifier.notify(event(0)).unwrap();
        // Nothing has been received yet, so the single slot is taken
        assert!(matches!(notifier.notify(event(1)), Err(RelayError::QueueFull)));

        handle.abort();
    }
}
