//! Seams between the resolver and the page it runs in.
//!
//! The browser implementations read `window.location`, the injected config
//! global and `window.localStorage`. The in-memory ones back the tests and any
//! host without a DOM.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use contracts::system::connection::{InjectedConfig, INJECTED_CONFIG_GLOBAL};
use wasm_bindgen::JsValue;
use web_sys::window;

use super::error::{LocationError, StorageError};

/// The parts of the page location the mode detector looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLocation {
    /// Includes the trailing colon, e.g. `https:` or `file:`.
    pub protocol: String,
    pub hostname: String,
    pub pathname: String,
    /// `scheme://host[:port]`, no trailing slash.
    pub origin: String,
}

impl PageLocation {
    /// Build a location from an origin and a path, deriving protocol and hostname.
    pub fn from_origin(origin: &str, pathname: &str) -> Self {
        let (protocol, host) = match origin.find("//") {
            Some(idx) => (&origin[..idx], &origin[idx + 2..]),
            None => (origin, ""),
        };
        let hostname = host.split(':').next().unwrap_or_default();
        Self {
            protocol: protocol.to_string(),
            hostname: hostname.to_string(),
            pathname: pathname.to_string(),
            origin: origin.trim_end_matches('/').to_string(),
        }
    }
}

/// Where the page was loaded from and what the entrypoint injected.
pub trait HostEnvironment {
    fn location(&self) -> Result<PageLocation, LocationError>;

    /// The injected config object, if the page exposes one.
    fn injected_config(&self) -> Option<InjectedConfig>;
}

/// Synchronous string key-value storage scoped to the page origin.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// The real page, via `web_sys::window()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserEnvironment;

impl HostEnvironment for BrowserEnvironment {
    fn location(&self) -> Result<PageLocation, LocationError> {
        let location = window().ok_or(LocationError::NoWindow)?.location();
        let read = |value: Result<String, JsValue>| {
            value.map_err(|e| LocationError::Access(js_error(e)))
        };
        Ok(PageLocation {
            protocol: read(location.protocol())?,
            hostname: read(location.hostname())?,
            pathname: read(location.pathname())?,
            origin: read(location.origin())?,
        })
    }

    fn injected_config(&self) -> Option<InjectedConfig> {
        let window = window()?;
        let value =
            js_sys::Reflect::get(&window, &JsValue::from_str(INJECTED_CONFIG_GLOBAL)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        match serde_wasm_bindgen::from_value::<InjectedConfig>(value) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", INJECTED_CONFIG_GLOBAL, e);
                None
            }
        }
    }
}

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Access(js_error(e)))?
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Access(js_error(e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Access(js_error(e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Access(js_error(e)))
    }
}

/// Fixed location and injected config, for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    pub location: Option<PageLocation>,
    pub injected: Option<InjectedConfig>,
}

impl StaticEnvironment {
    pub fn new(location: PageLocation) -> Self {
        Self {
            location: Some(location),
            injected: None,
        }
    }

    pub fn with_injected(mut self, injected: InjectedConfig) -> Self {
        self.injected = Some(injected);
        self
    }
}

impl HostEnvironment for StaticEnvironment {
    fn location(&self) -> Result<PageLocation, LocationError> {
        self.location.clone().ok_or(LocationError::NoWindow)
    }

    fn injected_config(&self) -> Option<InjectedConfig> {
        self.injected.clone()
    }
}

/// In-memory storage. `set_failing(true)` makes every call fail.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.get() {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_origin() {
        let loc = PageLocation::from_origin("http://homeassistant:8123", "/lovelace/0");
        assert_eq!(loc.protocol, "http:");
        assert_eq!(loc.hostname, "homeassistant");
        assert_eq!(loc.pathname, "/lovelace/0");
        assert_eq!(loc.origin, "http://homeassistant:8123");

        let file = PageLocation::from_origin("file://", "/home/user/index.html");
        assert_eq!(file.protocol, "file:");
        assert_eq!(file.hostname, "");
    }

    #[test]
    fn test_memory_storage_roundtrip_and_failure() {
        let storage = MemoryStorage::new().with_item("a", "1");
        assert_eq!(storage.get("a"), Ok(Some("1".to_string())));
        storage.set("b", "2").unwrap();
        storage.remove("a").unwrap();
        assert_eq!(storage.get("a"), Ok(None));

        storage.set_failing(true);
        assert_eq!(storage.get("b"), Err(StorageError::Unavailable));
        assert!(storage.set("c", "3").is_err());
    }

    #[test]
    fn test_static_environment_without_location() {
        let env = StaticEnvironment::default();
        assert_eq!(env.location(), Err(LocationError::NoWindow));
        assert_eq!(env.injected_config(), None);
    }
}
