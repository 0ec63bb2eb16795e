//! Jackpot Protocol - wire types for the game server WebSocket.
//!
//! Every frame in either direction is a JSON text `Envelope`:
//! `{"type": "<message-type>", "data": { ... }}`.
//!
//! - `messages`: the envelope plus the typed outbound `ClientMessage`
//! - `responses`: typed payloads of the inbound server messages
//!
//! No business logic lives here. Inbound payloads are decoded lazily by the
//! client's routers so that unknown message types never fail to parse.

pub mod messages;
pub mod responses;

pub use messages::{
    message_types, CheckActiveGameData, ClientMessage, Envelope, GetBalanceData, InitData,
};
pub use responses::{ActiveGameData, ActiveGameInfo, BalanceData, InitResponseData};
