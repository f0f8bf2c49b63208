use leptos::prelude::*;

use super::environment::{BrowserEnvironment, BrowserStorage, HostEnvironment, KeyValueStore};
use super::resolver::{ConnectionResolver, Resolution};

pub type BrowserResolver = ConnectionResolver<BrowserEnvironment, BrowserStorage>;

/// Reactive handle on the app's connection resolver.
///
/// Views reading through it re-render when a refresh changes the resolution.
pub struct ConnectionContext<E: 'static = BrowserEnvironment, S: 'static = BrowserStorage> {
    resolver: RwSignal<ConnectionResolver<E, S>, LocalStorage>,
}

impl<E: 'static, S: 'static> Clone for ConnectionContext<E, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: 'static, S: 'static> Copy for ConnectionContext<E, S> {}

impl ConnectionContext {
    /// Resolve against the current page.
    pub fn new() -> Self {
        Self::from_resolver(ConnectionResolver::new(BrowserEnvironment, BrowserStorage))
    }
}

impl Default for ConnectionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: HostEnvironment + 'static, S: KeyValueStore + 'static> ConnectionContext<E, S> {
    pub fn from_resolver(resolver: ConnectionResolver<E, S>) -> Self {
        Self {
            resolver: RwSignal::new_local(resolver),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolver.with(|r| r.resolution().clone())
    }

    pub fn api_base(&self) -> Option<String> {
        self.resolver.with(|r| r.api_base().map(str::to_string))
    }

    pub fn is_standalone(&self) -> bool {
        self.resolver.with(|r| r.is_standalone())
    }

    pub fn has_backend(&self) -> bool {
        self.resolver.with(|r| r.has_backend())
    }

    pub fn token(&self) -> Option<String> {
        self.resolver.with_untracked(|r| r.stored_token())
    }

    pub fn refresh(&self) -> Option<String> {
        let mut base_url = None;
        self.resolver.update(|r| base_url = r.refresh());
        base_url
    }

    /// Persist both settings and re-resolve in one go.
    pub fn save_settings(&self, url: Option<&str>, token: Option<&str>) -> Option<String> {
        self.resolver.with_untracked(|r| {
            r.set_base_url(url);
            r.set_token(token);
        });
        self.refresh()
    }
}

/// Create the browser resolver and provide it to the component tree.
pub fn provide_connection_context() -> ConnectionContext {
    let ctx = ConnectionContext::new();
    provide_context(ctx);
    ctx
}

/// Hook to access the connection context
pub fn use_connection() -> ConnectionContext {
    use_context::<ConnectionContext>().expect("ConnectionContext not provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::connection::environment::{MemoryStorage, PageLocation, StaticEnvironment};
    use contracts::system::connection::{BASE_URL_KEY, TOKEN_KEY};

    #[test]
    fn test_save_settings_refreshes_resolution() {
        let env = StaticEnvironment::new(PageLocation::from_origin("http://localhost:8080", "/"));
        let ctx =
            ConnectionContext::from_resolver(ConnectionResolver::new(env, MemoryStorage::new()));
        assert!(ctx.is_standalone());
        assert!(!ctx.has_backend());

        let base = ctx.save_settings(Some("10.0.0.7:8123/api"), Some("llat"));
        assert_eq!(base.as_deref(), Some("http://10.0.0.7:8123"));
        assert_eq!(ctx.api_base().as_deref(), Some("http://10.0.0.7:8123"));
        assert_eq!(ctx.token().as_deref(), Some("llat"));
        assert!(ctx.has_backend());
    }

    #[test]
    fn test_refresh_picks_up_external_writes() {
        let env = StaticEnvironment::new(PageLocation::from_origin("http://localhost:8080", "/"));
        let storage = MemoryStorage::new()
            .with_item(BASE_URL_KEY, "http://ha.local:8123")
            .with_item(TOKEN_KEY, "t");
        let ctx = ConnectionContext::from_resolver(ConnectionResolver::new(env, storage));
        assert!(ctx.has_backend());

        ctx.save_settings(None, None);
        assert_eq!(ctx.resolution().base_url, None);
        assert_eq!(ctx.token(), None);
    }
}
