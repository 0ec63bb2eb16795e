//! Identity bootstrap
//!
//! One-shot acquisition of the player's identity from the host platform,
//! followed by opening the game socket. The bootstrap never blocks the caller
//! on failure: if the platform SDK cannot be loaded it logs, reports the
//! outcome and leaves the store untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::infrastructure::messaging::ConnectionManager;
use crate::ports::outbound::{InitDataUnsafe, PlatformPort};
use crate::state::{GameStore, User};

/// Result of `IdentityBootstrapper::initialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// User published and socket opened
    Initialized,
    /// A previous call already ran (or is running) the bootstrap
    AlreadyStarted,
    /// The platform SDK failed to load; nothing was published
    PlatformUnavailable,
}

pub struct IdentityBootstrapper {
    platform: Arc<dyn PlatformPort>,
    store: GameStore,
    connection: ConnectionManager,
    started: AtomicBool,
    initialized: AtomicBool,
}

impl IdentityBootstrapper {
    pub fn new(
        platform: Arc<dyn PlatformPort>,
        store: GameStore,
        connection: ConnectionManager,
    ) -> Self {
        Self {
            platform,
            store,
            connection,
            started: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
        }
    }

    /// Load the platform, publish the user and open the socket.
    ///
    /// Runs at most once per bootstrapper; it is not retried after a failure.
    pub async fn initialize(&self) -> BootstrapOutcome {
        if self.started.swap(true, Ordering::SeqCst) {
            return BootstrapOutcome::AlreadyStarted;
        }

        if let Err(e) = self.platform.load().await {
            tracing::error!(error = %e, "Failed to load platform SDK");
            return BootstrapOutcome::PlatformUnavailable;
        }

        self.platform.ready();
        self.platform.expand();

        let user = user_from_init_data(&self.platform.init_data());
        tracing::info!(user_id = ?user.user_id, name = %user.name, "Player identity resolved");
        self.store.user.set(user);
        self.initialized.store(true, Ordering::SeqCst);

        self.connection.open();
        BootstrapOutcome::Initialized
    }

    pub fn current_user(&self) -> User {
        self.store.user.get()
    }

    /// True once the bootstrap finished and the user has an id.
    pub fn is_user_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst) && self.store.user.with(|u| u.user_id.is_some())
    }

    /// The platform SDK, once it has loaded.
    pub fn platform(&self) -> Option<Arc<dyn PlatformPort>> {
        self.initialized
            .load(Ordering::SeqCst)
            .then(|| Arc::clone(&self.platform))
    }
}

/// Placeholder user overlaid with whatever the platform provided.
fn user_from_init_data(init_data: &InitDataUnsafe) -> User {
    let mut user = User::placeholder();
    if let Some(platform_user) = &init_data.user {
        user.user_id = Some(platform_user.id);
        user.name = platform_user.display_name();
        if let Some(photo) = platform_user.photo_url.as_ref().filter(|s| !s.is_empty()) {
            user.avatar = photo.clone();
        }
        user.email = platform_user.email.clone().filter(|s| !s.is_empty());
        user.phone = platform_user.phone.clone().filter(|s| !s.is_empty());
    }
    user
}
