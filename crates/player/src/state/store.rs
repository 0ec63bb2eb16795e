//! Game store
//!
//! Named observable containers read by the UI and written by the bootstrap
//! and the message routers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Observable;

/// Placeholder identity used when the platform provides no user.
pub mod defaults {
    pub const USER_ID: i64 = 2_088_567_890_000_000_000;
    pub const NAME: &str = "default-user";
    pub const AVATAR: &str = "https://via.placeholder.com/40";
}

/// The signed-in player.
///
/// `Default` is the empty record the store starts with; it has no `user_id`
/// and therefore cannot be used for requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: Option<i64>,
    pub name: String,
    pub avatar: String,
    pub balance: f64,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl User {
    /// Placeholder record the bootstrap starts from before platform data.
    pub fn placeholder() -> Self {
        Self {
            user_id: Some(defaults::USER_ID),
            name: defaults::NAME.to_string(),
            avatar: defaults::AVATAR.to_string(),
            balance: 0.0,
            email: None,
            phone: None,
        }
    }
}

/// The game the player is currently seated in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_id: i64,
    pub game_number: i64,
    pub no_players: usize,
    pub jackpot: u64,
}

/// Plain copy of every container, for logging and assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub user: User,
    pub balance: f64,
    pub game: Option<Game>,
    pub game_players: Vec<Value>,
    pub player_card: Value,
    pub game_type: Option<String>,
}

/// Shared state store.
///
/// Cloning shares the underlying containers.
#[derive(Clone)]
pub struct GameStore {
    pub user: Observable<User>,
    pub balance: Observable<f64>,
    pub game: Observable<Option<Game>>,
    pub game_players: Observable<Vec<Value>>,
    pub player_card: Observable<Value>,
    pub game_type: Observable<Option<String>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            user: Observable::new("user", User::default()),
            balance: Observable::new("balance", 0.0),
            game: Observable::new("game", None),
            game_players: Observable::new("game-players", Vec::new()),
            player_card: Observable::new("player-card", Value::Null),
            game_type: Observable::new("game-type", None),
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            user: self.user.get(),
            balance: self.balance.get(),
            game: self.game.get(),
            game_players: self.game_players.get(),
            player_card: self.player_card.get(),
            game_type: self.game_type.get(),
        }
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}
