//! Test doubles shared by unit tests (and by downstream crates with the
//! `testing` feature).

mod fake_transport;

pub use fake_transport::{FakeConnector, FakeSocket};
