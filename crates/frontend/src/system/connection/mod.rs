pub mod bindings;
pub mod context;
pub mod detector;
pub mod environment;
pub mod error;
pub mod resolver;
pub mod store;
pub mod url;

pub use context::{provide_connection_context, use_connection, ConnectionContext};
pub use error::{LocationError, StorageError};
pub use resolver::{ConnectionResolver, Resolution};
