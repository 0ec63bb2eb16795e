//! Navigation Port - the UI router.

/// Paths the client navigates to.
pub mod routes {
    pub const HOME: &str = "/";
    pub const PLAY: &str = "/play";
}

#[cfg_attr(test, mockall::automock)]
pub trait NavigationPort: Send + Sync {
    /// Navigate to `path`.
    fn goto(&self, path: &str);
}
