//! Off-chain relay that turns committed `WithdrawalRequested` events into
//! operational notifications. Delivery is best effort and never feeds back
//! into the ledger.

pub mod config;
pub mod decoder;
pub mod dispatcher;
pub mod error;
pub mod message;
pub mod sink;

pub use config::RelayConfig;
pub use decoder::decode_withdrawal_log;
pub use dispatcher::{deliver_with_retry, DispatchStats, Notifier};
pub use error::{RelayError, RelayResult};
pub use message::{format_pesos, withdrawal_message};
pub use sink::{LogSink, NotificationSink};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .try_init();
}
