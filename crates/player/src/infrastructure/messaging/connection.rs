//! Connection lifecycle management.
//!
//! `ConnectionManager` owns at most one transport handle at a time. Opening
//! is idempotent while a handle is referenced; the handle is released only
//! when the socket reports that it closed, after which `open()` may create a
//! fresh one. There is no automatic reconnect.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use uuid::Uuid;

use jackpot_shared::ClientMessage;

use crate::ports::outbound::{
    ReadyState, TransportConnector, TransportError, TransportEvents, TransportPort,
};
use crate::state::Observable;

/// A published transport handle.
#[derive(Clone)]
pub struct SocketHandle {
    connection_id: Uuid,
    transport: Arc<dyn TransportPort>,
}

impl SocketHandle {
    pub fn connection_id(&self) -> Uuid {
        self.connection_id
    }

    pub fn ready_state(&self) -> ReadyState {
        self.transport.ready_state()
    }

    pub fn is_open(&self) -> bool {
        self.ready_state() == ReadyState::Open
    }
}

impl std::fmt::Debug for SocketHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketHandle")
            .field("connection_id", &self.connection_id)
            .field("ready_state", &self.ready_state())
            .finish()
    }
}

/// The referenced handle plus a counter bumped on every change to it.
#[derive(Default)]
struct ActiveSlot {
    handle: Option<SocketHandle>,
    generation: u64,
}

impl ActiveSlot {
    fn replace(&mut self, handle: Option<SocketHandle>) {
        self.handle = handle;
        self.generation = self.generation.wrapping_add(1);
    }
}

struct ManagerInner {
    url: String,
    connector: Arc<dyn TransportConnector>,
    active: Mutex<ActiveSlot>,
    connected: Observable<bool>,
    last_message: Observable<Option<String>>,
    socket: Observable<Option<SocketHandle>>,
}

impl ManagerInner {
    fn active(&self) -> MutexGuard<'_, ActiveSlot> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, connection_id: Uuid) -> bool {
        self.active()
            .handle
            .as_ref()
            .is_some_and(|h| h.connection_id == connection_id)
    }

    /// Publish the referenced handle on the `socket` observable.
    ///
    /// Subscribers run without the slot lock held, so the slot may change
    /// while they run. Publishing repeats until the value last published
    /// matches the slot.
    fn publish_socket(&self) {
        loop {
            let (handle, generation) = {
                let slot = self.active();
                (slot.handle.clone(), slot.generation)
            };
            self.socket.set(handle);
            if self.active().generation == generation {
                break;
            }
        }
    }
}

/// Owner of the single game socket.
///
/// Cloning yields another handle to the same manager.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<ManagerInner>,
}

impl ConnectionManager {
    pub fn new(url: impl Into<String>, connector: Arc<dyn TransportConnector>) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                url: url.into(),
                connector,
                active: Mutex::new(ActiveSlot::default()),
                connected: Observable::new("socket-connected", false),
                last_message: Observable::new("socket-message", None),
                socket: Observable::new("socket", None),
            }),
        }
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Open the socket unless a handle is already referenced.
    ///
    /// Returns true if a new transport was created.
    pub fn open(&self) -> bool {
        {
            let mut active = self.inner.active();
            if let Some(existing) = active.handle.as_ref() {
                tracing::debug!(
                    connection_id = %existing.connection_id,
                    "Socket already initialized"
                );
                return false;
            }

            let connection_id = Uuid::new_v4();
            tracing::info!(url = %self.inner.url, %connection_id, "Opening game socket");

            let events = Arc::new(ConnectionEvents {
                manager: Arc::downgrade(&self.inner),
                connection_id,
            });
            let transport = self.inner.connector.connect(&self.inner.url, events);
            active.replace(Some(SocketHandle {
                connection_id,
                transport,
            }));
        }

        self.inner.publish_socket();
        true
    }

    /// True when a handle is referenced and its socket is open.
    pub fn is_open(&self) -> bool {
        self.inner
            .active()
            .handle
            .as_ref()
            .is_some_and(SocketHandle::is_open)
    }

    /// The currently referenced handle, if any.
    pub fn handle(&self) -> Option<SocketHandle> {
        self.inner.active().handle.clone()
    }

    /// Send a raw text frame if the socket is open.
    ///
    /// Returns `Ok(false)` when there is nothing open to send on.
    pub fn send_text(&self, text: String) -> Result<bool, TransportError> {
        let Some(handle) = self.handle().filter(SocketHandle::is_open) else {
            return Ok(false);
        };
        handle.transport.send(text)?;
        Ok(true)
    }

    /// Encode and send a client message if the socket is open.
    pub fn send(&self, message: &ClientMessage) -> Result<bool, TransportError> {
        let text = message.to_json()?;
        self.send_text(text)
    }

    /// Ask the current socket to close.
    ///
    /// The handle is released once the socket reports the close.
    pub fn close(&self) {
        if let Some(handle) = self.handle() {
            tracing::info!(connection_id = %handle.connection_id, "Closing game socket");
            handle.transport.close();
        }
    }

    /// Observable connected flag.
    pub fn connected(&self) -> Observable<bool> {
        self.inner.connected.clone()
    }

    /// Observable raw payload of the most recent inbound frame.
    pub fn last_message(&self) -> Observable<Option<String>> {
        self.inner.last_message.clone()
    }

    /// Observable current handle.
    pub fn socket(&self) -> Observable<Option<SocketHandle>> {
        self.inner.socket.clone()
    }
}

/// Callbacks registered with one transport.
///
/// Events from a transport that is no longer the referenced one are ignored.
struct ConnectionEvents {
    manager: Weak<ManagerInner>,
    connection_id: Uuid,
}

impl ConnectionEvents {
    fn current(&self) -> Option<Arc<ManagerInner>> {
        let manager = self.manager.upgrade()?;
        if manager.is_current(self.connection_id) {
            Some(manager)
        } else {
            tracing::debug!(
                connection_id = %self.connection_id,
                "Ignoring event from stale socket"
            );
            None
        }
    }
}

impl TransportEvents for ConnectionEvents {
    fn on_open(&self) {
        if let Some(manager) = self.current() {
            tracing::info!(connection_id = %self.connection_id, "WebSocket connected");
            manager.connected.set(true);
        }
    }

    fn on_message(&self, payload: String) {
        if let Some(manager) = self.current() {
            manager.last_message.set(Some(payload));
        }
    }

    fn on_error(&self, error: String) {
        tracing::error!(connection_id = %self.connection_id, "WebSocket error: {}", error);
    }

    fn on_close(&self) {
        let Some(manager) = self.manager.upgrade() else {
            return;
        };
        let released = {
            let mut active = manager.active();
            let current = active
                .handle
                .as_ref()
                .is_some_and(|h| h.connection_id == self.connection_id);
            if current {
                active.replace(None);
            }
            current
        };
        if !released {
            tracing::debug!(connection_id = %self.connection_id, "Stale socket closed");
            return;
        }

        tracing::warn!(connection_id = %self.connection_id, "WebSocket disconnected");
        manager.connected.set(false);
        manager.publish_socket();
    }
}
