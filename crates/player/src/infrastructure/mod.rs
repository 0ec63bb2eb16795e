//! Infrastructure adapters
//!
//! Concrete implementations of the outbound ports plus configuration.

pub mod config;
pub mod messaging;
pub mod navigation;
pub mod platform;
pub mod websocket;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{ClientConfig, ConfigError};
pub use messaging::{ConnectionManager, SocketHandle};
pub use navigation::RouteNavigator;
pub use platform::DesktopPlatform;
pub use websocket::WsConnector;
