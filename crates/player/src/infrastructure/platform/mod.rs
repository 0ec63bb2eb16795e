//! Platform SDK implementations
//!
//! The browser build talks to the host's JavaScript SDK; the native build
//! here reads the same unsigned init data from a JSON document instead.

mod desktop;

pub use desktop::DesktopPlatform;
