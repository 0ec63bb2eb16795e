//! WebSocket transport for the game server connection.
//!
//! - `client`: tokio-tungstenite implementation of the transport port

mod client;

pub use client::WsConnector;
