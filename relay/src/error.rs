use std::time::Duration;

pub type RelayResult<T> = Result<T, RelayError>;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("notification sink rejected the message: {0}")]
    Sink(String),

    #[error("notification attempt timed out after {0:?}")]
    Timeout(Duration),

    #[error("notification not delivered after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: Box<RelayError> },

    #[error("notification queue is full")]
    QueueFull,

    #[error("notification queue is closed")]
    QueueClosed,

    #[error("undecodable program data: {0}")]
    Decode(String),

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}
