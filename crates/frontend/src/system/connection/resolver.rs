//! Resolves which backend the dashboard talks to and caches the answer.
//!
//! Embedded pages use the custom component API under the page origin.
//! Standalone pages use the configured Home Assistant URL, or nothing at all
//! when the user has not configured one yet.

use contracts::system::connection::{ConnectionMode, InjectedConfig, EMBEDDED_API_PATH};

use super::detector;
use super::environment::{HostEnvironment, KeyValueStore};
use super::error::StorageError;
use super::store::ConnectionStore;
use super::url::join_api_path;

/// Result of one resolution. Always replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub mode: ConnectionMode,
    pub base_url: Option<String>,
}

impl Resolution {
    pub fn has_backend(&self) -> bool {
        self.base_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

pub struct ConnectionResolver<E, S> {
    env: E,
    store: ConnectionStore<S>,
    resolution: Resolution,
}

impl<E: HostEnvironment, S: KeyValueStore> ConnectionResolver<E, S> {
    /// Create the resolver and run the initial resolution.
    pub fn new(env: E, storage: S) -> Self {
        let mut resolver = Self {
            env,
            store: ConnectionStore::new(storage),
            resolution: Resolution::default(),
        };
        resolver.resolve();
        resolver
    }

    /// Recompute mode and base URL from the page and storage.
    pub fn resolve(&mut self) -> Option<String> {
        let resolution = self.compute();
        log::debug!(
            "HA connection resolved: mode={}, base={:?}",
            resolution.mode.as_str(),
            resolution.base_url
        );
        self.resolution = resolution;
        self.resolution.base_url.clone()
    }

    /// Re-detect after a settings change.
    pub fn refresh(&mut self) -> Option<String> {
        self.resolve()
    }

    fn compute(&self) -> Resolution {
        match self.env.location() {
            Ok(location) if detector::is_embedded(&location) => {
                return Resolution {
                    mode: ConnectionMode::Embedded,
                    base_url: Some(format!("{}{}", location.origin, EMBEDDED_API_PATH)),
                };
            }
            Ok(_) => {}
            Err(e) => log::debug!("Location unavailable, assuming standalone: {}", e),
        }

        Resolution {
            mode: ConnectionMode::Standalone,
            base_url: self.stored_base_url(),
        }
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// The cached API base.
    pub fn api_base(&self) -> Option<&str> {
        self.resolution.base_url.as_deref()
    }

    /// Full URL for an API path under the cached base.
    pub fn api_url(&self, path: &str) -> Option<String> {
        self.api_base().map(|base| join_api_path(base, path))
    }

    pub fn current_mode(&self) -> ConnectionMode {
        self.resolution.mode
    }

    pub fn is_standalone(&self) -> bool {
        self.resolution.mode.is_standalone()
    }

    pub fn has_backend(&self) -> bool {
        self.resolution.has_backend()
    }

    pub fn is_embedded_in_ha(&self) -> bool {
        detector::is_embedded_in_ha(&self.env)
    }

    pub fn injected_config(&self) -> Option<InjectedConfig> {
        self.env.injected_config()
    }

    pub fn stored_base_url(&self) -> Option<String> {
        self.store.base_url(self.injected_config().as_ref())
    }

    pub fn try_stored_base_url(&self) -> Result<Option<String>, StorageError> {
        self.store.try_base_url(self.injected_config().as_ref())
    }

    /// Alias kept for the settings dialog, which calls it the manual URL.
    pub fn manual_url(&self) -> Option<String> {
        self.stored_base_url()
    }

    /// Persist a new URL. Call [`refresh`](Self::refresh) to apply it.
    pub fn set_base_url(&self, url: Option<&str>) {
        self.store.set_base_url(url);
    }

    pub fn stored_token(&self) -> Option<String> {
        self.store.token(self.injected_config().as_ref())
    }

    pub fn try_stored_token(&self) -> Result<Option<String>, StorageError> {
        self.store.try_token(self.injected_config().as_ref())
    }

    pub fn set_token(&self, token: Option<&str>) {
        self.store.set_token(token);
    }
}
