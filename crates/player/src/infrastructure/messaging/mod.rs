//! Connection lifecycle and socket state.

pub mod connection;

pub use connection::{ConnectionManager, SocketHandle};
