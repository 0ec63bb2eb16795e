//! Envelope and outbound message types.
//!
//! The server speaks a flat `{type, data}` protocol. Outbound messages are
//! modelled as an adjacently tagged enum so serde produces exactly that shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message `type` strings used on the wire.
pub mod message_types {
    // Client -> server
    pub const INIT: &str = "init";
    pub const GET_BALANCE: &str = "get-balance";
    pub const CHECK_ACTIVE_GAME: &str = "check-active-game";

    // Server -> client
    pub const INIT_RESPONSE: &str = "init-response";
    pub const BALANCE_RESPONSE: &str = "balance-resp";
    pub const CHECK_ACTIVE_GAME_RESPONSE: &str = "check-active-game-response";
}

/// Untyped `{type, data}` wrapper used for inbound dispatch.
///
/// `data` defaults to `null` when the server omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn new(message_type: impl Into<String>, data: Value) -> Self {
        Self {
            message_type: message_type.into(),
            data,
        }
    }

    /// Parse a raw text frame.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Decode `data` into a typed payload.
    pub fn decode<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }
}

// =============================================================================
// Client Messages (Player -> Server)
// =============================================================================

/// Messages from the client to the game server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Register the player with the server
    Init(InitData),
    /// Ask for the player's current balance
    GetBalance(GetBalanceData),
    /// Ask whether the player is seated in a running game
    CheckActiveGame(CheckActiveGameData),
}

impl ClientMessage {
    /// The wire `type` of this message.
    pub fn message_type(&self) -> &'static str {
        match self {
            ClientMessage::Init(_) => message_types::INIT,
            ClientMessage::GetBalance(_) => message_types::GET_BALANCE,
            ClientMessage::CheckActiveGame(_) => message_types::CHECK_ACTIVE_GAME,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitData {
    pub user_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub avatar: String,
}

/// The server expects `userId` (camelCase) for this one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetBalanceData {
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckActiveGameData {
    pub user_id: i64,
}
