//! Transport Port - the persistent socket to the game server.
//!
//! Mirrors the browser `WebSocket` contract: a connector hands back a handle
//! immediately, then lifecycle events arrive later through `TransportEvents`.

use std::sync::Arc;

use thiserror::Error;

/// Socket ready state, as observed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Handshake in flight
    Connecting,
    /// Frames may be sent
    Open,
    /// Close requested, not yet acknowledged
    Closing,
    /// Socket is gone
    Closed,
}

impl ReadyState {
    /// Convert to u8 for atomic storage.
    pub fn to_u8(self) -> u8 {
        match self {
            ReadyState::Connecting => 0,
            ReadyState::Open => 1,
            ReadyState::Closing => 2,
            ReadyState::Closed => 3,
        }
    }

    /// Convert from u8 (atomic storage).
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => ReadyState::Connecting,
            1 => ReadyState::Open,
            2 => ReadyState::Closing,
            _ => ReadyState::Closed,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("socket is not open")]
    NotOpen,
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Lifecycle callbacks registered when a transport is created.
///
/// Implementations of `TransportConnector` must deliver these asynchronously,
/// never from inside `connect()`, and in the order the socket produced them.
pub trait TransportEvents: Send + Sync {
    fn on_open(&self);
    fn on_message(&self, payload: String);
    fn on_error(&self, error: String);
    fn on_close(&self);
}

/// A live transport handle.
pub trait TransportPort: Send + Sync {
    fn ready_state(&self) -> ReadyState;

    /// Queue a text frame. Fails if the socket is not open.
    fn send(&self, text: String) -> Result<(), TransportError>;

    /// Ask the socket to close. `on_close` fires once it is gone.
    fn close(&self);
}

/// Factory for transport handles.
pub trait TransportConnector: Send + Sync {
    fn connect(&self, url: &str, events: Arc<dyn TransportEvents>) -> Arc<dyn TransportPort>;
}
