//! Router adapter
//!
//! Without a UI the "router" is just the current path, published as an
//! observable so a front-end (or a test) can follow it.

use crate::ports::outbound::{routes, NavigationPort};
use crate::state::Observable;

#[derive(Clone)]
pub struct RouteNavigator {
    current: Observable<String>,
}

impl RouteNavigator {
    pub fn new() -> Self {
        Self {
            current: Observable::new("route", routes::HOME.to_string()),
        }
    }

    pub fn current(&self) -> Observable<String> {
        self.current.clone()
    }
}

impl Default for RouteNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationPort for RouteNavigator {
    fn goto(&self, path: &str) {
        tracing::info!(path, "Navigating");
        self.current.set(path.to_string());
    }
}
