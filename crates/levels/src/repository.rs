use async_trait::async_trait;
use common::now_iso8601;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{LevelError, LevelResult};
use crate::models::{validate_level, validate_name, AuthorLevel, AuthorLevelPatch, NewAuthorLevel};

/// Storage for the author level catalogue.
///
/// Every read returns an owned snapshot; callers never hold a view into
/// shared state across an await point.
#[async_trait]
pub trait LevelRepository: Send + Sync {
    /// All levels ordered by level number.
    async fn list(&self) -> Vec<AuthorLevel>;

    async fn get(&self, id: &str) -> LevelResult<AuthorLevel>;

    async fn create(&self, new: NewAuthorLevel) -> LevelResult<AuthorLevel>;

    async fn update(&self, id: &str, patch: AuthorLevelPatch) -> LevelResult<AuthorLevel>;

    async fn delete(&self, id: &str) -> LevelResult<()>;
}

struct LevelTable {
    levels: Vec<AuthorLevel>,
    next_id: u64,
}

impl LevelTable {
    fn ensure_unique(&self, level: u32, except_id: Option<&str>) -> LevelResult<()> {
        let taken = self
            .levels
            .iter()
            .any(|existing| existing.level == level && Some(existing.id.as_str()) != except_id);
        if taken {
            return Err(LevelError::DuplicateLevel(level));
        }
        Ok(())
    }

    fn insert(&mut self, new: NewAuthorLevel, now: &str) -> LevelResult<AuthorLevel> {
        let level = validate_level(new.level)?;
        let name = validate_name(&new.name)?;
        self.ensure_unique(level, None)?;

        let created = AuthorLevel {
            id: format!("level-{}", self.next_id),
            level,
            name,
            required_views: new.required_views,
            description: new.description,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        };
        self.next_id += 1;
        self.levels.push(created.clone());
        Ok(created)
    }
}

/// Process-local repository, seeded with the default tiers.
pub struct InMemoryLevelRepository {
    table: RwLock<LevelTable>,
}

impl InMemoryLevelRepository {
    pub fn empty() -> Self {
        Self {
            table: RwLock::new(LevelTable {
                levels: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn with_defaults() -> Self {
        let now = now_iso8601();
        let mut table = LevelTable {
            levels: Vec::new(),
            next_id: 1,
        };
        for (level, name, required_views) in DEFAULT_LEVELS {
            let seeded = table.insert(
                NewAuthorLevel {
                    level: *level,
                    name: name.to_string(),
                    required_views: *required_views,
                    description: None,
                },
                &now,
            );
            if let Err(e) = seeded {
                warn!("Skipping default author level {}: {}", level, e);
            }
        }

        Self {
            table: RwLock::new(table),
        }
    }
}

impl Default for InMemoryLevelRepository {
    fn default() -> Self {
        Self::with_defaults()
    }
}

const DEFAULT_LEVELS: &[(u32, &str, u64)] = &[
    (1, "Newcomer", 0),
    (2, "Rising Writer", 10_000),
    (3, "Established Author", 100_000),
    (4, "Master Storyteller", 1_000_000),
];

#[async_trait]
impl LevelRepository for InMemoryLevelRepository {
    async fn list(&self) -> Vec<AuthorLevel> {
        let mut levels = self.table.read().await.levels.clone();
        levels.sort_by_key(|level| level.level);
        levels
    }

    async fn get(&self, id: &str) -> LevelResult<AuthorLevel> {
        self.table
            .read()
            .await
            .levels
            .iter()
            .find(|level| level.id == id)
            .cloned()
            .ok_or_else(|| LevelError::NotFound(id.to_string()))
    }

    async fn create(&self, new: NewAuthorLevel) -> LevelResult<AuthorLevel> {
        let created = self.table.write().await.insert(new, &now_iso8601())?;
        info!("Created author level {} ({})", created.level, created.id);
        Ok(created)
    }

    async fn update(&self, id: &str, patch: AuthorLevelPatch) -> LevelResult<AuthorLevel> {
        let mut table = self.table.write().await;
        let index = table
            .levels
            .iter()
            .position(|level| level.id == id)
            .ok_or_else(|| LevelError::NotFound(id.to_string()))?;

        // Validate everything before touching the stored row.
        let level = patch.level.map(validate_level).transpose()?;
        let name = patch.name.as_deref().map(validate_name).transpose()?;
        if let Some(level) = level {
            table.ensure_unique(level, Some(id))?;
        }

        let row = &mut table.levels[index];
        if let Some(level) = level {
            row.level = level;
        }
        if let Some(name) = name {
            row.name = name;
        }
        if let Some(required_views) = patch.required_views {
            row.required_views = required_views;
        }
        if let Some(description) = patch.description {
            row.description = Some(description);
        }
        row.updated_at = now_iso8601();

        info!("Updated author level {}", id);
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> LevelResult<()> {
        let mut table = self.table.write().await;
        let before = table.levels.len();
        table.levels.retain(|level| level.id != id);
        if table.levels.len() == before {
            return Err(LevelError::NotFound(id.to_string()));
        }

        info!("Deleted author level {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_level(level: u32, name: &str) -> NewAuthorLevel {
        NewAuthorLevel {
            level,
            name: name.to_string(),
            required_views: level as u64 * 100,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_defaults_are_sorted() {
        let repo = InMemoryLevelRepository::with_defaults();
        let levels: Vec<u32> = repo.list().await.iter().map(|l| l.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_list_orders_by_level_number() {
        let repo = InMemoryLevelRepository::empty();
        repo.create(new_level(5, "Five")).await.unwrap();
        repo.create(new_level(2, "Two")).await.unwrap();
        repo.create(new_level(9, "Nine")).await.unwrap();

        let names: Vec<String> = repo.list().await.into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Two", "Five", "Nine"]);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates_and_blank_names() {
        let repo = InMemoryLevelRepository::empty();
        repo.create(new_level(1, "One")).await.unwrap();

        assert_eq!(
            repo.create(new_level(1, "Again")).await.unwrap_err(),
            LevelError::DuplicateLevel(1)
        );
        assert!(matches!(
            repo.create(new_level(2, "  ")).await.unwrap_err(),
            LevelError::Invalid(_)
        ));
        assert_eq!(repo.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached_from_later_writes() {
        let repo = InMemoryLevelRepository::empty();
        let created = repo.create(new_level(1, "One")).await.unwrap();
        let snapshot = repo.list().await;

        repo.update(
            &created.id,
            AuthorLevelPatch {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(snapshot[0].name, "One");
        assert_eq!(repo.get(&created.id).await.unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn test_update_keeps_own_level_and_rejects_taken_one() {
        let repo = InMemoryLevelRepository::empty();
        let one = repo.create(new_level(1, "One")).await.unwrap();
        repo.create(new_level(2, "Two")).await.unwrap();

        let same = repo
            .update(
                &one.id,
                AuthorLevelPatch {
                    level: Some(1),
                    required_views: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.required_views, 5);

        let err = repo
            .update(
                &one.id,
                AuthorLevelPatch {
                    level: Some(2),
                    name: Some("Clash".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, LevelError::DuplicateLevel(2));
        assert_eq!(repo.get(&one.id).await.unwrap().name, "One");
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let repo = InMemoryLevelRepository::empty();
        assert_eq!(
            repo.get("level-404").await.unwrap_err(),
            LevelError::NotFound("level-404".to_string())
        );
        assert!(matches!(
            repo.update("level-404", AuthorLevelPatch::default()).await,
            Err(LevelError::NotFound(_))
        ));
        assert!(matches!(repo.delete("level-404").await, Err(LevelError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_level() {
        let repo = InMemoryLevelRepository::with_defaults();
        let first = repo.list().await.remove(0);
        repo.delete(&first.id).await.unwrap();
        assert_eq!(repo.list().await.len(), 3);
        assert!(repo.get(&first.id).await.is_err());
    }
}
