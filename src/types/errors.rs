//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. The event
//! forwarder never produces errors of its own; everything here originates in
//! a channel, the wire codec, or configuration loading.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the wizard event transport.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input handed to a transport component.
    #[error("validation error: {0}")]
    Validation(String),

    /// The far side of a channel is gone (connection closed, receiver dropped).
    #[error("channel closed: {0}")]
    ChannelClosed(String),

    /// The outbound queue is full; the invocation was not enqueued.
    #[error("backpressure: {0}")]
    Backpressure(String),

    /// Msgpack encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Msgpack decoding failed.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the channel can never accept another invocation.
    pub fn is_closed(&self) -> bool {
        matches!(self, Error::ChannelClosed(_))
    }
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn channel_closed(msg: impl Into<String>) -> Self {
        Self::ChannelClosed(msg.into())
    }

    pub fn backpressure(msg: impl Into<String>) -> Self {
        Self::Backpressure(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<rmp_serde::encode::Error> for Error {
    fn from(err: rmp_serde::encode::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

impl From<rmp_serde::decode::Error> for Error {
    fn from(err: rmp_serde::decode::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
