//! Application layer: use cases built on the ports and the state store.

pub mod services;
