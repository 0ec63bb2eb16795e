//! Application services
//!
//! - `identity_service`: platform identity bootstrap
//! - `game_request_service`: outbound requests
//! - `message_router`: inbound message dispatch
//! - `follow_up_scheduler`: cancellable delayed follow-ups

pub mod follow_up_scheduler;
pub mod game_request_service;
pub mod identity_service;
pub mod message_router;

pub use follow_up_scheduler::FollowUpScheduler;
pub use game_request_service::{GameRequestService, RequestOutcome};
pub use identity_service::{BootstrapOutcome, IdentityBootstrapper};
pub use message_router::{MessageHandler, RouterChain, UserMessageRouter};
