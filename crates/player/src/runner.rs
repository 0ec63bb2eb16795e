use std::sync::Arc;

use crate::application::services::{
    BootstrapOutcome, FollowUpScheduler, GameRequestService, IdentityBootstrapper,
    MessageHandler, RouterChain, UserMessageRouter,
};
use crate::infrastructure::messaging::ConnectionManager;
use crate::infrastructure::{ClientConfig, DesktopPlatform, RouteNavigator, WsConnector};
use crate::ports::outbound::{NavigationPort, PlatformPort, TransportConnector};
use crate::state::{GameStore, Subscription};

/// Collaborators a `GameClient` is built from.
pub struct ClientDeps {
    pub config: ClientConfig,
    pub connector: Arc<dyn TransportConnector>,
    pub platform: Arc<dyn PlatformPort>,
    pub navigator: Arc<dyn NavigationPort>,
    /// Tried after the built-in user router, in order.
    pub extra_handlers: Vec<Arc<dyn MessageHandler>>,
}

/// Application context owned by the root of the app.
///
/// Owns the store, the socket and every service wired to them. Independent
/// instances share nothing.
pub struct GameClient {
    config: ClientConfig,
    store: GameStore,
    connection: ConnectionManager,
    requests: GameRequestService,
    bootstrap: IdentityBootstrapper,
    router: RouterChain,
    scheduler: FollowUpScheduler,
    _subscriptions: Vec<Subscription>,
}

impl GameClient {
    pub fn new(deps: ClientDeps) -> Self {
        let ClientDeps {
            config,
            connector,
            platform,
            navigator,
            extra_handlers,
        } = deps;

        let store = GameStore::new();
        let connection = ConnectionManager::new(config.ws_url.clone(), connector);
        let scheduler = FollowUpScheduler::new();
        let requests = GameRequestService::new(store.clone(), connection.clone());
        let bootstrap = IdentityBootstrapper::new(platform, store.clone(), connection.clone());

        let user_router: Arc<dyn MessageHandler> = Arc::new(UserMessageRouter::new(
            store.clone(),
            requests.clone(),
            navigator,
            scheduler.clone(),
            config.follow_up_delay,
            config.default_jackpot,
        ));
        let mut router = RouterChain::new(vec![user_router]);
        for handler in extra_handlers {
            router.push(handler);
        }

        let subscriptions = vec![
            {
                let router = router.clone();
                connection.last_message().subscribe(move |message| {
                    if let Some(text) = message {
                        router.route_text(text);
                    }
                })
            },
            {
                let requests = requests.clone();
                connection.connected().subscribe(move |connected| {
                    if *connected {
                        requests.send_init();
                    }
                })
            },
        ];

        Self {
            config,
            store,
            connection,
            requests,
            bootstrap,
            router,
            scheduler,
            _subscriptions: subscriptions,
        }
    }

    /// Bootstrap the player identity and open the socket.
    pub async fn initialize(&self) -> BootstrapOutcome {
        self.bootstrap.initialize().await
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    pub fn requests(&self) -> &GameRequestService {
        &self.requests
    }

    pub fn bootstrap(&self) -> &IdentityBootstrapper {
        &self.bootstrap
    }

    pub fn router(&self) -> &RouterChain {
        &self.router
    }

    /// Cancel pending follow-ups and close the socket.
    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
        self.connection.close();
    }
}

impl Drop for GameClient {
    fn drop(&mut self) {
        self.scheduler.cancel_all();
    }
}

/// Run the client until Ctrl-C.
pub async fn run(config: ClientConfig) -> anyhow::Result<()> {
    let navigator = RouteNavigator::new();
    let platform = DesktopPlatform::new(config.platform_init_data.clone());

    let client = GameClient::new(ClientDeps {
        connector: Arc::new(WsConnector::current()?),
        platform: Arc::new(platform),
        navigator: Arc::new(navigator.clone()),
        extra_handlers: Vec::new(),
        config,
    });

    let _balance_log = client.store().balance.subscribe(|balance| {
        tracing::info!(balance, "Balance updated");
    });

    match client.initialize().await {
        BootstrapOutcome::Initialized => {}
        outcome => tracing::warn!(?outcome, "Continuing without a player identity"),
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!(route = %navigator.current().get(), "Shutting down");
    client.shutdown().await;
    Ok(())
}
