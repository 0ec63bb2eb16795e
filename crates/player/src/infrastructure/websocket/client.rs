//! Desktop WebSocket client using tokio-tungstenite
//!
//! Each `connect` spawns one socket task. The task owns the stream, reports
//! lifecycle events through `TransportEvents`, and writes frames queued by the
//! handle. A failed handshake reports an error followed by a close, the same
//! sequence a browser socket produces.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::ports::outbound::{
    ReadyState, TransportConnector, TransportError, TransportEvents, TransportPort,
};

#[derive(Debug)]
enum Outbound {
    Text(String),
    Close,
}

/// Transport handle backed by a spawned socket task.
struct WsTransport {
    tx: mpsc::UnboundedSender<Outbound>,
    state: Arc<AtomicU8>,
}

impl TransportPort for WsTransport {
    fn ready_state(&self) -> ReadyState {
        ReadyState::from_u8(self.state.load(Ordering::SeqCst))
    }

    fn send(&self, text: String) -> Result<(), TransportError> {
        if self.ready_state() != ReadyState::Open {
            return Err(TransportError::NotOpen);
        }
        self.tx
            .send(Outbound::Text(text))
            .map_err(|e| TransportError::SendFailed(e.to_string()))
    }

    fn close(&self) {
        let state = self.ready_state();
        if matches!(state, ReadyState::Closing | ReadyState::Closed) {
            return;
        }
        self.state
            .store(ReadyState::Closing.to_u8(), Ordering::SeqCst);
        // The task may already be gone; nothing left to close then.
        let _ = self.tx.send(Outbound::Close);
    }
}

/// Connector that spawns tokio-tungstenite sockets on a runtime.
#[derive(Clone)]
pub struct WsConnector {
    runtime: Handle,
}

impl WsConnector {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime of the calling context.
    pub fn current() -> Result<Self, tokio::runtime::TryCurrentError> {
        Ok(Self::new(Handle::try_current()?))
    }
}

impl TransportConnector for WsConnector {
    fn connect(&self, url: &str, events: Arc<dyn TransportEvents>) -> Arc<dyn TransportPort> {
        let (tx, rx) = mpsc::unbounded_channel::<Outbound>();
        let state = Arc::new(AtomicU8::new(ReadyState::Connecting.to_u8()));

        self.runtime
            .spawn(run_socket(url.to_string(), rx, Arc::clone(&state), events));

        Arc::new(WsTransport { tx, state })
    }
}

async fn run_socket(
    url: String,
    mut rx: mpsc::UnboundedReceiver<Outbound>,
    state: Arc<AtomicU8>,
    events: Arc<dyn TransportEvents>,
) {
    let ws_stream = match connect_async(url.as_str()).await {
        Ok((ws_stream, _)) => ws_stream,
        Err(e) => {
            tracing::error!("Failed to connect to game server at {}: {}", url, e);
            state.store(ReadyState::Closed.to_u8(), Ordering::SeqCst);
            events.on_error(e.to_string());
            events.on_close();
            return;
        }
    };

    // close() may have been called while the handshake was in flight.
    if state
        .compare_exchange(
            ReadyState::Connecting.to_u8(),
            ReadyState::Open.to_u8(),
            Ordering::SeqCst,
            Ordering::SeqCst,
        )
        .is_ok()
    {
        tracing::debug!("Connected to game server at {}", url);
        events.on_open();
    }

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => events.on_message(text),
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed connection");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    events.on_error(e.to_string());
                    break;
                }
            },
            outbound = rx.recv() => match outbound {
                Some(Outbound::Text(text)) => {
                    if let Err(e) = write.send(Message::Text(text)).await {
                        events.on_error(e.to_string());
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    if let Err(e) = write.send(Message::Close(None)).await {
                        tracing::debug!("Close frame not delivered: {}", e);
                    }
                    break;
                }
            },
        }
    }

    state.store(ReadyState::Closed.to_u8(), Ordering::SeqCst);
    events.on_close();
}
