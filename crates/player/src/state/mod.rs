//! Client state
//!
//! - `observable`: the subscription primitive every container is built on
//! - `store`: the named game/user containers

mod observable;
mod store;

pub use observable::{Observable, Subscription};
pub use store::{defaults, Game, GameStore, StoreSnapshot, User};
