use serde::{Deserialize, Serialize};

use crate::error::{LevelError, LevelResult};

/// One tier of the author leveling system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorLevel {
    pub id: String,
    pub level: u32,
    pub name: String,
    pub required_views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthorLevel {
    pub level: u32,
    pub name: String,
    #[serde(default)]
    pub required_views: u64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update; absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorLevelPatch {
    pub level: Option<u32>,
    pub name: Option<String>,
    pub required_views: Option<u64>,
    pub description: Option<String>,
}

pub(crate) fn validate_level(level: u32) -> LevelResult<u32> {
    if level == 0 {
        return Err(LevelError::Invalid("level must be at least 1".to_string()));
    }
    Ok(level)
}

pub(crate) fn validate_name(name: &str) -> LevelResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LevelError::Invalid("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}
