//! JS surface for the rest of the dashboard.
//!
//! Method names match the globals older dashboard scripts already call.

use wasm_bindgen::prelude::*;

use super::context::BrowserResolver;
use super::environment::{BrowserEnvironment, BrowserStorage};
use super::resolver::ConnectionResolver;

#[wasm_bindgen]
pub struct HaConnection {
    resolver: BrowserResolver,
}

#[wasm_bindgen]
impl HaConnection {
    /// Resolves immediately against the current page.
    #[wasm_bindgen(constructor)]
    pub fn new() -> HaConnection {
        HaConnection {
            resolver: ConnectionResolver::new(BrowserEnvironment, BrowserStorage),
        }
    }

    #[wasm_bindgen(js_name = isEmbeddedInHA)]
    pub fn is_embedded_in_ha(&self) -> bool {
        self.resolver.is_embedded_in_ha()
    }

    #[wasm_bindgen(js_name = getHaBaseUrl)]
    pub fn base_url(&self) -> Option<String> {
        self.resolver.stored_base_url()
    }

    #[wasm_bindgen(js_name = getHaManualUrl)]
    pub fn manual_url(&self) -> Option<String> {
        self.resolver.manual_url()
    }

    #[wasm_bindgen(js_name = setHaManualUrl)]
    pub fn set_manual_url(&self, url: Option<String>) {
        self.resolver.set_base_url(url.as_deref());
    }

    #[wasm_bindgen(js_name = getHaToken)]
    pub fn token(&self) -> Option<String> {
        self.resolver.stored_token()
    }

    #[wasm_bindgen(js_name = setHaToken)]
    pub fn set_token(&self, token: Option<String>) {
        self.resolver.set_token(token.as_deref());
    }

    /// Cached API base; `undefined` when standalone and unconfigured.
    #[wasm_bindgen(getter = apiBase)]
    pub fn api_base(&self) -> Option<String> {
        self.resolver.api_base().map(str::to_string)
    }

    #[wasm_bindgen(js_name = apiUrl)]
    pub fn api_url(&self, path: &str) -> Option<String> {
        self.resolver.api_url(path)
    }

    #[wasm_bindgen(js_name = refreshHaBaseUrl)]
    pub fn refresh(&mut self) -> Option<String> {
        self.resolver.refresh()
    }

    #[wasm_bindgen(js_name = isStandaloneMode)]
    pub fn is_standalone(&self) -> bool {
        self.resolver.is_standalone()
    }

    #[wasm_bindgen(js_name = hasHaBackend)]
    pub fn has_backend(&self) -> bool {
        self.resolver.has_backend()
    }

    /// `"embedded"` or `"standalone"`.
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.resolver.current_mode().as_str().to_string()
    }
}

impl Default for HaConnection {
    fn default() -> Self {
        Self::new()
    }
}
