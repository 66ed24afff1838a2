//! Edition catalog commands.

use std::fmt::Write as _;

use printhouse_core::{Edition, SizeTier};

use crate::cli::EditionCommands;
use crate::error::AppError;
use crate::state::Registry;

pub async fn run(registry: Registry<'_>, action: EditionCommands) -> Result<String, AppError> {
    match action {
        EditionCommands::Add {
            house,
            title,
            pages,
            size,
        } => add(registry, &house, &title, pages, size).await,
        EditionCommands::List { house } => list(registry, &house).await,
        EditionCommands::Update {
            house,
            position,
            title,
            pages,
            size,
        } => update(registry, &house, position, title.as_deref(), pages, size).await,
        EditionCommands::Remove { house, position } => {
            if registry.remove_edition(&house, position).await? {
                Ok(format!("Removed edition #{}", position))
            } else {
                Ok(format!("No edition #{}", position))
            }
        }
    }
}

pub async fn add(
    registry: Registry<'_>,
    key: &str,
    title: &str,
    pages: u32,
    size: SizeTier,
) -> Result<String, AppError> {
    let edition = Edition::new(title.trim(), pages, size)?;
    let stored = registry.add_edition(key, &edition).await?;
    Ok(format!("Added edition #{} '{}'", stored.position, edition.title()))
}

/// Rebuilds the edition at `position` from its current values and the
/// given changes, re-running every edition check.
pub async fn update(
    registry: Registry<'_>,
    key: &str,
    position: usize,
    title: Option<&str>,
    pages: Option<u32>,
    size: Option<SizeTier>,
) -> Result<String, AppError> {
    if title.is_none() && pages.is_none() && size.is_none() {
        return Err(AppError::validation(
            "nothing to update: pass --title, --pages or --size",
        ));
    }

    let current = registry.edition(key, position).await?;
    let edition = Edition::new(
        title.map(str::trim).unwrap_or(current.title()),
        pages.unwrap_or(current.page_count()),
        size.unwrap_or(current.size()),
    )?;
    registry.update_edition(key, position, &edition).await?;
    Ok(format!("Updated edition #{} '{}'", position, edition.title()))
}

pub async fn list(registry: Registry<'_>, key: &str) -> Result<String, AppError> {
    let editions = registry.editions(key).await?;
    if editions.is_empty() {
        return Ok("Catalog is empty".to_string());
    }

    let mut out = String::new();
    for stored in editions {
        let e = &stored.edition;
        let _ = writeln!(
            out,
            "#{:<3} {:<40} {:>5} pages  {}  ({} sheets/copy)",
            stored.position,
            e.title(),
            e.page_count(),
            e.size(),
            e.sheets_per_copy()
        );
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{registry_with_house, test_db};
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_add_and_list() {
        let db = test_db().await;
        let registry = registry_with_house(&db).await;

        let out = add(registry, "Main Street", "  Atlas of Sofia ", 41, SizeTier::A3)
            .await
            .unwrap();
        assert_eq!(out, "Added edition #0 'Atlas of Sofia'");

        let listing = list(registry, "Main Street").await.unwrap();
        assert!(listing.contains("Atlas of Sofia"));
        assert!(listing.contains("(21 sheets/copy)"));
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields() {
        let db = test_db().await;
        let registry = registry_with_house(&db).await;
        add(registry, "Main Street", "Field Guide", 40, SizeTier::A5).await.unwrap();
        add(registry, "Main Street", "Road Atlas", 64, SizeTier::A3).await.unwrap();

        let out = update(registry, "Main Street", 0, None, Some(48), None)
            .await
            .unwrap();
        assert_eq!(out, "Updated edition #0 'Field Guide'");

        let edition = registry.edition("Main Street", 0).await.unwrap();
        assert_eq!(edition.title(), "Field Guide");
        assert_eq!(edition.page_count(), 48);
        assert_eq!(edition.size(), SizeTier::A5);

        update(registry, "Main Street", 1, Some(" Road Atlas 2e "), None, Some(SizeTier::A2))
            .await
            .unwrap();
        let edition = registry.edition("Main Street", 1).await.unwrap();
        assert_eq!(edition.title(), "Road Atlas 2e");
        assert_eq!(edition.page_count(), 64);
        assert_eq!(edition.size(), SizeTier::A2);
    }

    #[tokio::test]
    async fn test_update_is_validated() {
        let db = test_db().await;
        let registry = registry_with_house(&db).await;
        add(registry, "Main Street", "Field Guide", 40, SizeTier::A5).await.unwrap();

        let err = update(registry, "Main Street", 0, None, Some(2), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let err = update(registry, "Main Street", 0, None, None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let err = update(registry, "Main Street", 3, Some("Elsewhere"), None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        // the stored edition is unchanged
        assert_eq!(registry.edition("Main Street", 0).await.unwrap().page_count(), 40);
    }

    #[tokio::test]
    async fn test_invalid_edition_rejected() {
        let db = test_db().await;
        let registry = registry_with_house(&db).await;

        let err = add(registry, "Main Street", "Tiny", 2, SizeTier::A5).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let err = add(registry, "Main Street", "X", 20, SizeTier::A5).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(list(registry, "Main Street").await.unwrap(), "Catalog is empty");
    }
}
