//! PlatformPort - the host chat platform's mini-app SDK
//!
//! The SDK is loaded once at startup and then exposes the launching user's
//! identity. Everything in the identity payload is optional.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to load platform SDK: {0}")]
    LoadFailed(String),
    #[error("invalid platform init data: {0}")]
    InvalidInitData(String),
}

/// User block of the platform's unsigned init data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl PlatformUser {
    /// First and last name joined by a space, or just the first name.
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref().filter(|s| !s.is_empty()) {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// Unsigned init data handed to the mini-app by the host platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitDataUnsafe {
    #[serde(default)]
    pub user: Option<PlatformUser>,
}

/// Platform SDK port
///
/// `load` must complete before any other method is meaningful.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformPort: Send + Sync {
    /// Load the SDK. An error means the platform is unavailable.
    async fn load(&self) -> Result<(), PlatformError>;

    /// Tell the host the app is ready to be shown.
    fn ready(&self);

    /// Ask the host to expand the app to full height.
    fn expand(&self);

    /// Identity of the launching user, if the host provided one.
    fn init_data(&self) -> InitDataUnsafe;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_joins_last_name() {
        let user = PlatformUser {
            id: 1,
            first_name: "Ada".into(),
            last_name: Some("Lovelace".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_without_last_name() {
        let user = PlatformUser {
            id: 1,
            first_name: "Ada".into(),
            last_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Ada");
    }
}
