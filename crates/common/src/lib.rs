pub mod backend_client;
pub mod clock;
pub mod config;
pub mod error;
pub mod source;

pub use backend_client::BackendClient;
pub use clock::now_iso8601;
pub use config::{Config, FailurePolicy};
pub use error::{BackendError, BackendResult};
pub use source::JsonSource;
