use thiserror::Error;

/// Faults raised by the persisted key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No window, or localStorage disabled by the browser.
    #[error("storage unavailable")]
    Unavailable,

    /// The storage call itself threw.
    #[error("storage access failed: {0}")]
    Access(String),
}

/// Faults raised while inspecting the page location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("no window object")]
    NoWindow,

    #[error("failed to read location: {0}")]
    Access(String),
}
