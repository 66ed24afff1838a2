//! # Print House Registry
//!
//! Resolves print houses by name or id and runs the load → change → save
//! cycle every mutating command goes through.
//!
//! ```text
//!   get_by_name / get_by_id ──► PrintHouse ──► closure ──► update
//!                                                 │
//!                                                 └── Err: nothing is saved
//! ```

use printhouse_core::{Edition, PrintHouse};
use printhouse_db::{Database, StoredEdition, StoredPrintHouse};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AppError;

/// A print house with its catalog, as written by `export` and read by
/// `import`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseArchive {
    pub name: String,
    pub house: PrintHouse,
    #[serde(default)]
    pub editions: Vec<Edition>,
}

/// Print houses and their catalogs, keyed by name or id.
#[derive(Debug, Clone, Copy)]
pub struct Registry<'a> {
    db: &'a Database,
}

impl<'a> Registry<'a> {
    pub fn new(db: &'a Database) -> Self {
        Registry { db }
    }

    /// Registers a new house under a unique name.
    pub async fn create_house(
        &self,
        name: &str,
        house: &PrintHouse,
    ) -> Result<StoredPrintHouse, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("print house name is required"));
        }
        let stored = self.db.print_houses().insert(name, house).await?;
        info!(id = %stored.id, name = %stored.name, "Print house created");
        Ok(stored)
    }

    pub async fn houses(&self) -> Result<Vec<StoredPrintHouse>, AppError> {
        Ok(self.db.print_houses().list().await?)
    }

    /// Finds a house by name, then by id.
    pub async fn find_house(&self, key: &str) -> Result<StoredPrintHouse, AppError> {
        let repo = self.db.print_houses();
        if let Some(stored) = repo.get_by_name(key).await? {
            return Ok(stored);
        }
        repo.get_by_id(key)
            .await?
            .ok_or_else(|| AppError::not_found("Print house", key))
    }

    /// Loads a house, applies `change` and saves the result.
    ///
    /// The house is only written back when `change` succeeds, so a rejected
    /// operation leaves the stored state untouched.
    pub async fn modify_house<T, F>(&self, key: &str, change: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut PrintHouse) -> Result<T, AppError>,
    {
        let mut stored = self.find_house(key).await?;
        let output = change(&mut stored.house)?;
        self.db.print_houses().update(&stored.id, &stored.house).await?;
        debug!(id = %stored.id, "Print house saved");
        Ok(output)
    }

    /// Removes a house and its catalog. Returns false if nothing matched.
    pub async fn remove_house(&self, key: &str) -> Result<bool, AppError> {
        let stored = match self.find_house(key).await {
            Ok(stored) => stored,
            Err(err) if err.code == crate::error::ErrorCode::NotFound => {
                warn!(key = %key, "Print house not found for removal");
                return Ok(false);
            }
            Err(err) => return Err(err),
        };
        let removed = self.db.print_houses().delete(&stored.id).await?;
        info!(id = %stored.id, name = %stored.name, "Print house removed");
        Ok(removed)
    }

    pub async fn add_edition(&self, key: &str, edition: &Edition) -> Result<StoredEdition, AppError> {
        let stored = self.find_house(key).await?;
        let added = self.db.editions().add(&stored.id, edition).await?;
        info!(house = %stored.name, position = added.position, title = %edition.title(), "Edition added");
        Ok(added)
    }

    pub async fn editions(&self, key: &str) -> Result<Vec<StoredEdition>, AppError> {
        let stored = self.find_house(key).await?;
        Ok(self.db.editions().list(&stored.id).await?)
    }

    /// Returns the catalog edition at `position`.
    pub async fn edition(&self, key: &str, position: usize) -> Result<Edition, AppError> {
        let stored = self.find_house(key).await?;
        self.db
            .editions()
            .get(&stored.id, position)
            .await?
            .map(|e| e.edition)
            .ok_or_else(|| AppError::not_found("Edition", &position.to_string()))
    }

    /// Replaces the catalog edition at `position`.
    pub async fn update_edition(
        &self,
        key: &str,
        position: usize,
        edition: &Edition,
    ) -> Result<(), AppError> {
        let stored = self.find_house(key).await?;
        if !self.db.editions().update(&stored.id, position, edition).await? {
            return Err(AppError::not_found("Edition", &position.to_string()));
        }
        info!(house = %stored.name, position, title = %edition.title(), "Edition updated");
        Ok(())
    }

    /// Every house with its catalog, oldest first.
    pub async fn snapshot(&self) -> Result<Vec<HouseArchive>, AppError> {
        let mut archives = Vec::new();
        for stored in self.houses().await? {
            let editions = self
                .db
                .editions()
                .list(&stored.id)
                .await?
                .into_iter()
                .map(|e| e.edition)
                .collect();
            archives.push(HouseArchive {
                name: stored.name,
                house: stored.house,
                editions,
            });
        }
        Ok(archives)
    }

    /// Replaces every stored house and catalog with `archives`.
    ///
    /// The houses are swapped in one transaction; a duplicate or blank name
    /// rejects the whole set before anything is written.
    pub async fn restore(&self, archives: &[HouseArchive]) -> Result<usize, AppError> {
        let mut houses: Vec<(String, PrintHouse)> = Vec::with_capacity(archives.len());
        for archive in archives {
            let name = archive.name.trim();
            if name.is_empty() {
                return Err(AppError::validation("print house name is required"));
            }
            if houses.iter().any(|(existing, _)| existing == name) {
                return Err(AppError::validation(format!("duplicate print house '{}'", name)));
            }
            houses.push((name.to_string(), archive.house.clone()));
        }

        let stored = self.db.print_houses().replace_all(&houses).await?;
        for (house, archive) in stored.iter().zip(archives) {
            self.db.editions().replace_all(&house.id, &archive.editions).await?;
        }
        info!(count = stored.len(), "Print houses restored");
        Ok(stored.len())
    }

    /// Removes the edition at `position`. A missing position is logged and
    /// reported as `false`.
    pub async fn remove_edition(&self, key: &str, position: usize) -> Result<bool, AppError> {
        let stored = self.find_house(key).await?;
        let removed = self.db.editions().remove(&stored.id, position).await?;
        if removed {
            info!(house = %stored.name, position, "Edition removed");
        } else {
            warn!(house = %stored.name, position, "Edition not found for removal");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use printhouse_core::{HouseSettings, PrintingPress, SizeTier};
    use printhouse_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn house() -> PrintHouse {
        PrintHouse::new(HouseSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_find_by_name_or_id() {
        let db = test_db().await;
        let registry = Registry::new(&db);
        let stored = registry.create_house("Main Street", &house()).await.unwrap();

        assert_eq!(registry.find_house("Main Street").await.unwrap().id, stored.id);
        assert_eq!(registry.find_house(&stored.id).await.unwrap().name, "Main Street");

        let err = registry.find_house("Elsewhere").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = test_db().await;
        let err = Registry::new(&db).create_house("   ", &house()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_modify_saves_only_on_success() {
        let db = test_db().await;
        let registry = Registry::new(&db);
        registry.create_house("Main Street", &house()).await.unwrap();

        registry
            .modify_house("Main Street", |h| {
                h.add_press(PrintingPress::new(100, 10, false, 60)?);
                Ok(())
            })
            .await
            .unwrap();

        let err = registry
            .modify_house("Main Street", |h| {
                h.press_mut(0)
                    .ok_or_else(|| AppError::not_found("Press", "0"))?
                    .load_paper(50)?;
                Err::<(), _>(AppError::validation("abort"))
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let stored = registry.find_house("Main Street").await.unwrap();
        assert_eq!(stored.house.presses().len(), 1);
        assert_eq!(stored.house.presses()[0].current_paper_load(), 10);
    }

    #[tokio::test]
    async fn test_edition_catalog() {
        let db = test_db().await;
        let registry = Registry::new(&db);
        registry.create_house("Main Street", &house()).await.unwrap();

        let lotr = Edition::new("The Lord of the Rings", 400, SizeTier::A5).unwrap();
        registry.add_edition("Main Street", &lotr).await.unwrap();

        assert_eq!(registry.edition("Main Street", 0).await.unwrap(), lotr);
        assert_eq!(
            registry.edition("Main Street", 3).await.unwrap_err().code,
            ErrorCode::NotFound
        );

        assert!(!registry.remove_edition("Main Street", 3).await.unwrap());
        assert!(registry.remove_edition("Main Street", 0).await.unwrap());
        assert!(registry.editions("Main Street").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_edition() {
        let db = test_db().await;
        let registry = Registry::new(&db);
        registry.create_house("Main Street", &house()).await.unwrap();
        let draft = Edition::new("Draft", 10, SizeTier::A5).unwrap();
        registry.add_edition("Main Street", &draft).await.unwrap();

        let final_cut = Edition::new("Final Cut", 12, SizeTier::A4).unwrap();
        registry.update_edition("Main Street", 0, &final_cut).await.unwrap();
        assert_eq!(registry.edition("Main Street", 0).await.unwrap(), final_cut);

        let err = registry
            .update_edition("Main Street", 1, &final_cut)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_snapshot_and_restore() {
        let db = test_db().await;
        let registry = Registry::new(&db);
        registry.create_house("Main Street", &house()).await.unwrap();
        let atlas = Edition::new("Atlas", 64, SizeTier::A3).unwrap();
        registry.add_edition("Main Street", &atlas).await.unwrap();

        let snapshot = registry.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].editions, vec![atlas.clone()]);

        registry.create_house("Riverside", &house()).await.unwrap();
        assert_eq!(registry.restore(&snapshot).await.unwrap(), 1);

        let names: Vec<String> = registry.houses().await.unwrap().into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["Main Street"]);
        assert_eq!(registry.edition("Main Street", 0).await.unwrap(), atlas);
    }

    #[tokio::test]
    async fn test_restore_rejects_duplicate_names() {
        let db = test_db().await;
        let registry = Registry::new(&db);
        registry.create_house("Main Street", &house()).await.unwrap();

        let archive = HouseArchive {
            name: "Twin".to_string(),
            house: house(),
            editions: Vec::new(),
        };
        let err = registry
            .restore(&[archive.clone(), archive])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // nothing was replaced
        assert_eq!(registry.houses().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_house_is_not_an_error() {
        let db = test_db().await;
        assert!(!Registry::new(&db).remove_house("Nowhere").await.unwrap());
    }
}
