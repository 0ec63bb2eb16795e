//! Desktop platform implementation
//!
//! Stands in for the host chat platform's mini-app SDK. "Loading" the SDK
//! reads the launch init data (`{"user": {...}}`) from a JSON file. Without a
//! file the SDK loads with no user, exactly like a host that launched the app
//! outside of a chat.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::ports::outbound::{InitDataUnsafe, PlatformError, PlatformPort};

pub struct DesktopPlatform {
    init_data_path: Option<PathBuf>,
    init_data: Mutex<Option<InitDataUnsafe>>,
}

impl DesktopPlatform {
    pub fn new(init_data_path: Option<PathBuf>) -> Self {
        Self {
            init_data_path,
            init_data: Mutex::new(None),
        }
    }
}

#[async_trait]
impl PlatformPort for DesktopPlatform {
    async fn load(&self) -> Result<(), PlatformError> {
        let init_data = match &self.init_data_path {
            None => InitDataUnsafe::default(),
            Some(path) => {
                let text = tokio::fs::read_to_string(path).await.map_err(|e| {
                    PlatformError::LoadFailed(format!("{}: {}", path.display(), e))
                })?;
                serde_json::from_str(&text)
                    .map_err(|e| PlatformError::InvalidInitData(e.to_string()))?
            }
        };

        *self
            .init_data
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(init_data);
        Ok(())
    }

    fn ready(&self) {
        tracing::debug!("Platform ready");
    }

    fn expand(&self) {
        tracing::debug!("Platform expanded");
    }

    fn init_data(&self) -> InitDataUnsafe {
        self.init_data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_default()
    }
}
