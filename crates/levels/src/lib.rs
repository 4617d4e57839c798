pub mod error;
pub mod models;
pub mod repository;

pub use error::{LevelError, LevelResult};
pub use models::{AuthorLevel, AuthorLevelPatch, NewAuthorLevel};
pub use repository::{InMemoryLevelRepository, LevelRepository};
