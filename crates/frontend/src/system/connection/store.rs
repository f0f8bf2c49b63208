//! Persisted Home Assistant URL and token.
//!
//! Read precedence is injected config, then the primary key, then the legacy
//! key. The `try_*` methods surface storage faults; the plain ones log and
//! fall back so callers never see a fault.

use contracts::system::connection::{InjectedConfig, BASE_URL_KEY, LEGACY_URL_KEY, TOKEN_KEY};

use super::environment::KeyValueStore;
use super::error::StorageError;
use super::url::{normalize_url, sanitize_url};

pub struct ConnectionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> ConnectionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Base URL, normalized.
    pub fn try_base_url(
        &self,
        injected: Option<&InjectedConfig>,
    ) -> Result<Option<String>, StorageError> {
        if let Some(url) = injected.and_then(InjectedConfig::url) {
            return Ok(normalize_url(url));
        }

        for key in [BASE_URL_KEY, LEGACY_URL_KEY] {
            if let Some(url) = self.storage.get(key)?.as_deref().and_then(normalize_url) {
                return Ok(Some(url));
            }
        }

        Ok(None)
    }

    pub fn base_url(&self, injected: Option<&InjectedConfig>) -> Option<String> {
        self.try_base_url(injected).unwrap_or_else(|e| {
            log::warn!("Failed to read HA URL: {}", e);
            None
        })
    }

    /// Long-lived access token. Tokens are opaque and never normalized.
    pub fn try_token(
        &self,
        injected: Option<&InjectedConfig>,
    ) -> Result<Option<String>, StorageError> {
        if let Some(token) = injected.and_then(InjectedConfig::token) {
            return Ok(Some(token.to_string()));
        }
        Ok(self.storage.get(TOKEN_KEY)?.filter(|v| !v.is_empty()))
    }

    pub fn token(&self, injected: Option<&InjectedConfig>) -> Option<String> {
        self.try_token(injected).unwrap_or_else(|e| {
            log::warn!("Failed to read HA token: {}", e);
            None
        })
    }

    /// Store the URL under both keys, or delete both when `url` is blank.
    pub fn try_set_base_url(&self, url: Option<&str>) -> Result<(), StorageError> {
        match url.and_then(sanitize_url) {
            Some(url) => {
                self.storage.set(BASE_URL_KEY, &url)?;
                self.storage.set(LEGACY_URL_KEY, &url)
            }
            None => {
                self.storage.remove(BASE_URL_KEY)?;
                self.storage.remove(LEGACY_URL_KEY)
            }
        }
    }

    pub fn set_base_url(&self, url: Option<&str>) {
        if let Err(e) = self.try_set_base_url(url) {
            log::error!("Failed to save HA URL: {}", e);
        }
    }

    pub fn try_set_token(&self, token: Option<&str>) -> Result<(), StorageError> {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => self.storage.set(TOKEN_KEY, token),
            None => self.storage.remove(TOKEN_KEY),
        }
    }

    pub fn set_token(&self, token: Option<&str>) {
        if let Err(e) = self.try_set_token(token) {
            log::error!("Failed to save HA token: {}", e);
        }
    }
}
