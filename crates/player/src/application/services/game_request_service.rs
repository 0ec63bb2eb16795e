//! Game request service for sending outbound requests.
//!
//! Requests are built from the current user and sent only while the socket
//! is open. Anything that cannot be sent is logged and dropped; there is no
//! queue and nothing is surfaced to the player.

use jackpot_shared::{
    CheckActiveGameData, ClientMessage, GetBalanceData, InitData,
};

use crate::infrastructure::messaging::ConnectionManager;
use crate::state::GameStore;

/// What happened to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Handed to the open socket
    Sent,
    /// No `user_id` in the store
    NoUser,
    /// Socket absent or not open
    NotConnected,
    /// Encoding or transport failure
    Failed,
}

#[derive(Clone)]
pub struct GameRequestService {
    store: GameStore,
    connection: ConnectionManager,
}

impl GameRequestService {
    pub fn new(store: GameStore, connection: ConnectionManager) -> Self {
        Self { store, connection }
    }

    /// Register the current user with the server.
    pub fn send_init(&self) -> RequestOutcome {
        let user = self.store.user.get();
        let Some(user_id) = user.user_id else {
            tracing::error!("No player data available for init payload");
            return RequestOutcome::NoUser;
        };

        self.dispatch(ClientMessage::Init(InitData {
            user_id,
            name: user.name,
            phone: user.phone,
            email: user.email,
            avatar: user.avatar,
        }))
    }

    pub fn get_balance(&self) -> RequestOutcome {
        let Some(user_id) = self.store.user.with(|u| u.user_id) else {
            tracing::error!("No player data available for balance request");
            return RequestOutcome::NoUser;
        };

        self.dispatch(ClientMessage::GetBalance(GetBalanceData { user_id }))
    }

    pub fn check_active_game(&self) -> RequestOutcome {
        let Some(user_id) = self.store.user.with(|u| u.user_id) else {
            tracing::error!("No player data available for active game check");
            return RequestOutcome::NoUser;
        };

        self.dispatch(ClientMessage::CheckActiveGame(CheckActiveGameData {
            user_id,
        }))
    }

    fn dispatch(&self, message: ClientMessage) -> RequestOutcome {
        let message_type = message.message_type();
        match self.connection.send(&message) {
            Ok(true) => {
                tracing::debug!(message_type, "Request sent");
                RequestOutcome::Sent
            }
            Ok(false) => {
                tracing::debug!(message_type, "Socket not open, request dropped");
                RequestOutcome::NotConnected
            }
            Err(e) => {
                tracing::error!(message_type, error = %e, "Failed to send request");
                RequestOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::infrastructure::testing::FakeConnector;
    use crate::state::User;

    struct Harness {
        service: GameRequestService,
        store: GameStore,
        connection: ConnectionManager,
        connector: FakeConnector,
    }

    fn harness() -> Harness {
        let connector = FakeConnector::new();
        let connection = ConnectionManager::new("ws://test/v1/ws", Arc::new(connector.clone()));
        let store = GameStore::new();
        Harness {
            service: GameRequestService::new(store.clone(), connection.clone()),
            store,
            connection,
            connector,
        }
    }

    fn signed_in_user() -> User {
        User {
            user_id: Some(77),
            name: "Ada Lovelace".into(),
            avatar: "https://example.com/ada.png".into(),
            balance: 0.0,
            email: Some("ada@example.com".into()),
            phone: None,
        }
    }

    fn call_all(service: &GameRequestService) -> [RequestOutcome; 3] {
        [
            service.send_init(),
            service.get_balance(),
            service.check_active_game(),
        ]
    }

    #[test]
    fn test_nothing_sent_without_socket() {
        let h = harness();
        h.store.user.set(signed_in_user());

        assert_eq!(call_all(&h.service), [RequestOutcome::NotConnected; 3]);
        assert_eq!(h.connector.connect_count(), 0);
    }

    #[test]
    fn test_nothing_sent_while_connecting() {
        let h = harness();
        h.store.user.set(signed_in_user());
        h.connection.open();

        assert_eq!(call_all(&h.service), [RequestOutcome::NotConnected; 3]);
        assert_eq!(h.connector.total_sent(), 0);
    }

    #[test]
    fn test_nothing_sent_without_user_id() {
        let h = harness();
        h.connection.open();
        h.connector.latest().expect("socket").simulate_open();

        assert_eq!(call_all(&h.service), [RequestOutcome::NoUser; 3]);
        assert_eq!(h.connector.total_sent(), 0);
    }

    #[test]
    fn test_sends_envelopes_when_open() {
        let h = harness();
        h.store.user.set(signed_in_user());
        h.connection.open();
        let socket = h.connector.latest().expect("socket");
        socket.simulate_open();

        assert_eq!(call_all(&h.service), [RequestOutcome::Sent; 3]);
        assert_eq!(
            socket.sent_json(),
            vec![
                json!({"type": "init", "data": {
                    "user_id": 77,
                    "name": "Ada Lovelace",
                    "phone": null,
                    "email": "ada@example.com",
                    "avatar": "https://example.com/ada.png"
                }}),
                json!({"type": "get-balance", "data": {"userId": 77}}),
                json!({"type": "check-active-game", "data": {"user_id": 77}}),
            ]
        );
    }

    #[test]
    fn test_nothing_sent_after_close() {
        let h = harness();
        h.store.user.set(signed_in_user());
        h.connection.open();
        let socket = h.connector.latest().expect("socket");
        socket.simulate_open();
        socket.simulate_close();

        assert_eq!(h.service.get_balance(), RequestOutcome::NotConnected);
        assert!(socket.sent().is_empty());
    }
}
