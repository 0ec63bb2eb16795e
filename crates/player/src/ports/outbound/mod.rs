//! Outbound ports
//!
//! - `transport_port`: the socket to the game server
//! - `platform_port`: the host chat platform's SDK (identity provider)
//! - `navigation_port`: the UI router

pub mod navigation_port;
pub mod platform_port;
pub mod transport_port;

pub use navigation_port::{routes, NavigationPort};
pub use platform_port::{InitDataUnsafe, PlatformError, PlatformPort, PlatformUser};
pub use transport_port::{
    ReadyState, TransportConnector, TransportError, TransportEvents, TransportPort,
};

#[cfg(test)]
pub use navigation_port::MockNavigationPort;
#[cfg(test)]
pub use platform_port::MockPlatformPort;
