//! In-memory transport that records what the client sends and lets tests
//! drive the socket lifecycle by hand.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::outbound::{
    ReadyState, TransportConnector, TransportError, TransportEvents, TransportPort,
};

struct SocketInner {
    url: String,
    events: Arc<dyn TransportEvents>,
    state: AtomicU8,
    sent: Mutex<Vec<String>>,
    close_requests: AtomicUsize,
}

/// Test-side control for one fake socket.
#[derive(Clone)]
pub struct FakeSocket {
    inner: Arc<SocketInner>,
}

impl FakeSocket {
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    pub fn ready_state(&self) -> ReadyState {
        ReadyState::from_u8(self.inner.state.load(Ordering::SeqCst))
    }

    /// Complete the handshake.
    pub fn simulate_open(&self) {
        self.inner
            .state
            .store(ReadyState::Open.to_u8(), Ordering::SeqCst);
        self.inner.events.on_open();
    }

    /// Deliver an inbound text frame.
    pub fn simulate_message(&self, payload: impl Into<String>) {
        self.inner.events.on_message(payload.into());
    }

    pub fn simulate_error(&self, error: impl Into<String>) {
        self.inner.events.on_error(error.into());
    }

    /// Drop the socket from the server side.
    pub fn simulate_close(&self) {
        self.inner
            .state
            .store(ReadyState::Closed.to_u8(), Ordering::SeqCst);
        self.inner.events.on_close();
    }

    /// Frames the client sent on this socket, in order.
    pub fn sent(&self) -> Vec<String> {
        self.inner
            .sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sent frames decoded as JSON.
    pub fn sent_json(&self) -> Vec<serde_json::Value> {
        self.sent()
            .iter()
            .filter_map(|text| serde_json::from_str(text).ok())
            .collect()
    }

    pub fn close_requests(&self) -> usize {
        self.inner.close_requests.load(Ordering::SeqCst)
    }
}

struct FakeTransport {
    inner: Arc<SocketInner>,
}

impl TransportPort for FakeTransport {
    fn ready_state(&self) -> ReadyState {
        ReadyState::from_u8(self.inner.state.load(Ordering::SeqCst))
    }

    fn send(&self, text: String) -> Result<(), TransportError> {
        if self.ready_state() != ReadyState::Open {
            return Err(TransportError::NotOpen);
        }
        self.inner
            .sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text);
        Ok(())
    }

    fn close(&self) {
        self.inner.close_requests.fetch_add(1, Ordering::SeqCst);
        if self.ready_state() != ReadyState::Closed {
            self.inner
                .state
                .store(ReadyState::Closing.to_u8(), Ordering::SeqCst);
        }
    }
}

/// Connector that hands out `FakeSocket`s and remembers every one of them.
#[derive(Clone, Default)]
pub struct FakeConnector {
    sockets: Arc<Mutex<Vec<FakeSocket>>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `connect` was called.
    pub fn connect_count(&self) -> usize {
        self.sockets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn socket(&self, index: usize) -> Option<FakeSocket> {
        self.sockets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index)
            .cloned()
    }

    pub fn latest(&self) -> Option<FakeSocket> {
        self.sockets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Frames sent across every socket this connector created.
    pub fn total_sent(&self) -> usize {
        self.sockets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|s| s.sent().len())
            .sum()
    }
}

impl TransportConnector for FakeConnector {
    fn connect(&self, url: &str, events: Arc<dyn TransportEvents>) -> Arc<dyn TransportPort> {
        let inner = Arc::new(SocketInner {
            url: url.to_string(),
            events,
            state: AtomicU8::new(ReadyState::Connecting.to_u8()),
            sent: Mutex::new(Vec::new()),
            close_requests: AtomicUsize::new(0),
        });
        self.sockets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(FakeSocket {
                inner: Arc::clone(&inner),
            });
        Arc::new(FakeTransport { inner })
    }
}
