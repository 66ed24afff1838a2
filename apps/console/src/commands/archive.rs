//! Whole-database export and import as JSON.
//!
//! ```text
//! [
//!   { "name": "Main Street", "house": { settings, employees, presses },
//!     "editions": [ { "title": ..., "page_count": ..., "size": ... } ] }
//! ]
//! ```
//!
//! Import decodes and validates the whole file before the database is
//! touched, then replaces every stored house.

use std::path::Path;

use tracing::info;

use crate::error::AppError;
use crate::state::{HouseArchive, Registry};

pub async fn export(registry: Registry<'_>, file: &Path) -> Result<String, AppError> {
    let archives = registry.snapshot().await?;
    let json = serde_json::to_string_pretty(&archives)
        .map_err(|e| AppError::internal(format!("cannot encode export: {}", e)))?;

    std::fs::write(file, json).map_err(|e| {
        AppError::internal(format!("cannot write {}: {}", file.display(), e))
    })?;

    info!(file = %file.display(), houses = archives.len(), "Exported print houses");
    Ok(format!(
        "Exported {} print house(s) to {}",
        archives.len(),
        file.display()
    ))
}

pub async fn import(registry: Registry<'_>, file: &Path) -> Result<String, AppError> {
    let json = std::fs::read_to_string(file).map_err(|e| {
        AppError::internal(format!("cannot read {}: {}", file.display(), e))
    })?;
    let archives: Vec<HouseArchive> = serde_json::from_str(&json).map_err(|e| {
        AppError::validation(format!("{} is not a print house export: {}", file.display(), e))
    })?;

    let count = registry.restore(&archives).await?;
    info!(file = %file.display(), houses = count, "Imported print houses");
    Ok(format!(
        "Imported {} print house(s) from {}",
        count,
        file.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{registry_with_house, test_config, test_db};
    use crate::commands::{demo, report};
    use crate::error::ErrorCode;
    use printhouse_core::{Edition, HouseSettings, PrintHouse, SizeTier};
    use std::path::PathBuf;

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("printhouse-{}-{}.json", label, std::process::id()))
    }

    #[tokio::test]
    async fn test_export_then_import_into_fresh_database() {
        let file = temp_file("round-trip");
        let config = test_config();

        let source = test_db().await;
        let registry = Registry::new(&source);
        demo::run(registry, &config, "Demo").await.unwrap();
        let before = report::run(registry, &config, "Demo", true).await.unwrap();

        let out = export(registry, &file).await.unwrap();
        assert!(out.starts_with("Exported 1 print house(s)"));

        let target = test_db().await;
        let restored = Registry::new(&target);
        let out = import(restored, &file).await.unwrap();
        assert!(out.starts_with("Imported 1 print house(s)"));

        assert_eq!(report::run(restored, &config, "Demo", true).await.unwrap(), before);
        assert_eq!(
            restored.editions("Demo").await.unwrap().len(),
            registry.editions("Demo").await.unwrap().len()
        );

        let _ = std::fs::remove_file(&file);
    }

    #[tokio::test]
    async fn test_import_replaces_existing_houses() {
        let file = temp_file("replace");
        let db = test_db().await;
        let registry = registry_with_house(&db).await;
        let guide = Edition::new("Field Guide", 40, SizeTier::A5).unwrap();
        registry.add_edition("Main Street", &guide).await.unwrap();
        export(registry, &file).await.unwrap();

        registry.remove_edition("Main Street", 0).await.unwrap();
        let empty = PrintHouse::new(HouseSettings::default()).unwrap();
        registry.create_house("Riverside", &empty).await.unwrap();

        import(registry, &file).await.unwrap();
        let names: Vec<String> = registry.houses().await.unwrap().into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["Main Street"]);
        assert_eq!(registry.edition("Main Street", 0).await.unwrap(), guide);

        let _ = std::fs::remove_file(&file);
    }

    #[tokio::test]
    async fn test_import_rejects_invalid_payload_without_writing() {
        let file = temp_file("invalid");
        let db = test_db().await;
        let registry = registry_with_house(&db).await;
        let guide = Edition::new("Field Guide", 40, SizeTier::A5).unwrap();
        registry.add_edition("Main Street", &guide).await.unwrap();
        export(registry, &file).await.unwrap();

        // page count below the minimum
        let json = std::fs::read_to_string(&file).unwrap();
        assert!(json.contains("\"page_count\": 40"));
        std::fs::write(&file, json.replace("\"page_count\": 40", "\"page_count\": 1")).unwrap();

        registry.remove_edition("Main Street", 0).await.unwrap();
        let err = import(registry, &file).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(registry.editions("Main Street").await.unwrap().is_empty());

        std::fs::write(&file, "not json").unwrap();
        let err = import(registry, &file).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let _ = std::fs::remove_file(&file);
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let db = test_db().await;
        let err = import(Registry::new(&db), Path::new("/nonexistent/printhouse.json"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Internal);
    }
}
