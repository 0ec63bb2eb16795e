//! Ports - trait seams to the collaborators this crate does not own.

pub mod outbound;
