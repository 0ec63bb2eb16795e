//! Inbound payload types (Server -> Player).
//!
//! Fields the server may omit are `Option` so that a missing value can fall
//! back to what the client already holds. A field of the wrong JSON type is
//! treated the same as a missing one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of `init-response`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InitResponseData {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub balance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub phone: Option<String>,
}

/// Payload of `balance-resp`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BalanceData {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub balance: Option<f64>,
}

/// Payload of `check-active-game-response`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveGameData {
    pub game: ActiveGameInfo,
    /// Player descriptors are passed through to the UI untouched.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub players: Option<Vec<Value>>,
    #[serde(default)]
    pub card: Value,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub gtype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveGameInfo {
    pub id: i64,
    pub game_no: i64,
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Decodes an optional field, yielding `None` for null or mistyped values.
    pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_active_game_decodes_with_null_players() {
        let data: ActiveGameData = serde_json::from_value(json!({
            "game": {"id": 3, "game_no": 11},
            "players": null,
            "gtype": "classic"
        }))
        .expect("decode");

        assert_eq!(data.game, ActiveGameInfo { id: 3, game_no: 11 });
        assert!(data.players.is_none());
        assert!(data.card.is_null());
        assert_eq!(data.gtype.as_deref(), Some("classic"));
    }

    #[test]
    fn test_active_game_requires_game() {
        let result: Result<ActiveGameData, _> =
            serde_json::from_value(json!({"players": [], "card": "X"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_balance_missing_field_is_none() {
        let data: BalanceData = serde_json::from_value(json!({})).expect("decode");
        assert_eq!(data.balance, None);
    }

    #[test]
    fn test_init_response_mistyped_fields_become_none() {
        let data: InitResponseData = serde_json::from_value(json!({
            "user_id": "5",
            "name": "Server",
            "balance": "150.00",
            "email": 42,
            "phone": null
        }))
        .expect("decode");

        assert_eq!(
            data,
            InitResponseData {
                name: Some("Server".into()),
                ..InitResponseData::default()
            }
        );
    }

    #[test]
    fn test_active_game_non_array_players_is_none() {
        let data: ActiveGameData = serde_json::from_value(json!({
            "game": {"id": 1, "game_no": 2},
            "players": {"count": 3},
            "gtype": 7
        }))
        .expect("decode");

        assert!(data.players.is_none());
        assert!(data.gtype.is_none());
    }

    #[test]
    fn test_balance_as_string_is_none() {
        let data: BalanceData =
            serde_json::from_value(json!({"balance": "12.5"})).expect("decode");
        assert_eq!(data.balance, None);
    }
}
