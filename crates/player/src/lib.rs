//! Jackpot Player - client state, socket transport and message routing.
//!
//! The crate is split the same way as the rest of the workspace:
//! - `ports`: traits for the socket, the platform SDK and the router
//! - `infrastructure`: adapters for those ports, the connection manager, config
//! - `application`: identity bootstrap, requests and inbound routing
//! - `state`: observable containers the UI reads
//! - `runner`: the `GameClient` context that wires everything together

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod runner;
pub mod state;

pub use runner::{run, ClientDeps, GameClient};
