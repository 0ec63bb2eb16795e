//! Inbound message routing.
//!
//! Each `MessageHandler` owns a set of message types and reports whether it
//! handled an envelope. `RouterChain` offers every inbound frame to its
//! handlers in order until one claims it.

use std::sync::Arc;
use std::time::Duration;

use jackpot_shared::{
    message_types, ActiveGameData, BalanceData, Envelope, InitResponseData,
};

use super::{FollowUpScheduler, GameRequestService};
use crate::ports::outbound::{routes, NavigationPort};
use crate::state::{Game, GameStore};

/// A router for a family of inbound message types.
pub trait MessageHandler: Send + Sync {
    /// Returns false if the message type is not one this handler owns.
    fn handle(&self, envelope: &Envelope) -> bool;
}

/// Ordered list of handlers.
#[derive(Clone, Default)]
pub struct RouterChain {
    handlers: Vec<Arc<dyn MessageHandler>>,
}

impl RouterChain {
    pub fn new(handlers: Vec<Arc<dyn MessageHandler>>) -> Self {
        Self { handlers }
    }

    pub fn push(&mut self, handler: Arc<dyn MessageHandler>) {
        self.handlers.push(handler);
    }

    /// Parse a raw frame and route it.
    pub fn route_text(&self, text: &str) -> bool {
        match Envelope::parse(text) {
            Ok(envelope) => self.route(&envelope),
            Err(e) => {
                tracing::warn!("Failed to parse server message: {}", e);
                false
            }
        }
    }

    pub fn route(&self, envelope: &Envelope) -> bool {
        let handled = self.handlers.iter().any(|h| h.handle(envelope));
        if !handled {
            tracing::debug!(message_type = %envelope.message_type, "Unhandled message");
        }
        handled
    }
}

/// Handles the user/session messages: init, balance and active game.
pub struct UserMessageRouter {
    store: GameStore,
    requests: GameRequestService,
    navigator: Arc<dyn NavigationPort>,
    scheduler: FollowUpScheduler,
    follow_up_delay: Duration,
    default_jackpot: u64,
}

impl UserMessageRouter {
    pub fn new(
        store: GameStore,
        requests: GameRequestService,
        navigator: Arc<dyn NavigationPort>,
        scheduler: FollowUpScheduler,
        follow_up_delay: Duration,
        default_jackpot: u64,
    ) -> Self {
        Self {
            store,
            requests,
            navigator,
            scheduler,
            follow_up_delay,
            default_jackpot,
        }
    }

    fn on_init_response(&self, data: InitResponseData) {
        self.store.user.update(|user| {
            if data.user_id.is_some() {
                user.user_id = data.user_id;
            }
            if let Some(name) = data.name {
                user.name = name;
            }
            if let Some(balance) = data.balance {
                user.balance = balance;
            }
            if let Some(avatar) = data.avatar.filter(|s| !s.is_empty()) {
                user.avatar = avatar;
            }
            if let Some(email) = data.email.filter(|s| !s.is_empty()) {
                user.email = Some(email);
            }
            if let Some(phone) = data.phone.filter(|s| !s.is_empty()) {
                user.phone = Some(phone);
            }
        });

        let requests = self.requests.clone();
        self.scheduler.schedule(self.follow_up_delay, move || {
            requests.check_active_game();
            requests.get_balance();
        });
    }

    fn on_balance(&self, data: BalanceData) {
        if let Some(balance) = data.balance {
            self.store.balance.set(balance);
        }
    }

    fn on_active_game(&self, data: ActiveGameData) {
        let players = data.players.unwrap_or_default();
        let game = Game {
            game_id: data.game.id,
            game_number: data.game.game_no,
            no_players: players.len(),
            jackpot: self.default_jackpot,
        };
        tracing::info!(game_id = game.game_id, game_number = game.game_number, "Active game found");

        self.store.game.set(Some(game));
        self.store.game_players.set(players);
        self.store.player_card.set(data.card);
        self.store.game_type.set(data.gtype);

        self.navigator.goto(routes::PLAY);
    }
}

impl MessageHandler for UserMessageRouter {
    fn handle(&self, envelope: &Envelope) -> bool {
        let message_type = envelope.message_type.as_str();
        let decoded = match message_type {
            message_types::INIT_RESPONSE => {
                // The follow-ups are due even when the payload carries nothing usable.
                let data = envelope.decode().unwrap_or_else(|e| {
                    tracing::warn!(message_type, error = %e, "Malformed payload, merging nothing");
                    InitResponseData::default()
                });
                self.on_init_response(data);
                Ok(())
            }
            message_types::BALANCE_RESPONSE => {
                // A null payload carries no balance.
                if envelope.data.is_null() {
                    Ok(())
                } else {
                    envelope.decode().map(|d| self.on_balance(d))
                }
            }
            message_types::CHECK_ACTIVE_GAME_RESPONSE => {
                envelope.decode().map(|d| self.on_active_game(d))
            }
            _ => return false,
        };

        if let Err(e) = decoded {
            tracing::warn!(message_type, error = %e, "Malformed payload ignored");
        }
        true
    }
}
