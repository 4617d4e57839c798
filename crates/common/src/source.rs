use async_trait::async_trait;
use serde_json::Value;
use crate::error::BackendResult;

/// Anything that can answer a GET with a JSON document.
#[async_trait]
pub trait JsonSource: Send + Sync {
    /// Fetches `path` relative to the source root, forwarding `token` as
    /// the caller's credentials when present.
    async fn get_json(&self, path: &str, token: Option<&str>) -> BackendResult<Value>;

    fn name(&self) -> &'static str;
}
