//! # Employee Commands
//!
//! Staff are identified by EGN, which is checked before anything is stored.

use std::fmt::Write as _;

use printhouse_core::validation::validate_egn;
use printhouse_core::{Employee, Role};
use tracing::{info, warn};

use crate::cli::EmployeeCommands;
use crate::error::AppError;
use crate::state::Registry;

pub async fn run(registry: Registry<'_>, action: EmployeeCommands) -> Result<String, AppError> {
    match action {
        EmployeeCommands::Add { house, egn, role } => add(registry, &house, &egn, role).await,
        EmployeeCommands::List { house } => list(registry, &house).await,
        EmployeeCommands::Update { house, egn, role } => {
            update(registry, &house, &egn, role).await
        }
        EmployeeCommands::Remove { house, egn } => remove(registry, &house, &egn).await,
    }
}

pub async fn add(registry: Registry<'_>, key: &str, egn: &str, role: Role) -> Result<String, AppError> {
    let egn = egn.trim();
    validate_egn(egn)?;
    let employee = Employee::new(egn, role)?;

    registry
        .modify_house(key, |house| house.add_employee(employee).map_err(AppError::from))
        .await?;

    info!(house = %key, role = %role, "Employee added");
    Ok(format!("Added {} {}", role, egn))
}

pub async fn list(registry: Registry<'_>, key: &str) -> Result<String, AppError> {
    let stored = registry.find_house(key).await?;
    let employees = stored.house.employees();
    if employees.is_empty() {
        return Ok(format!("'{}' has no employees", stored.name));
    }

    let mut out = String::new();
    for employee in employees {
        let _ = writeln!(out, "{}  {}", employee.id(), employee.role());
    }
    Ok(out.trim_end().to_string())
}

pub async fn update(
    registry: Registry<'_>,
    key: &str,
    egn: &str,
    role: Role,
) -> Result<String, AppError> {
    let egn = egn.trim();
    registry
        .modify_house(key, |house| {
            if house.update_employee_role(egn, role) {
                Ok(())
            } else {
                Err(AppError::not_found("Employee", egn))
            }
        })
        .await?;

    info!(house = %key, role = %role, "Employee role changed");
    Ok(format!("{} is now {}", egn, role))
}

pub async fn remove(registry: Registry<'_>, key: &str, egn: &str) -> Result<String, AppError> {
    let egn = egn.trim();
    let removed = registry
        .modify_house(key, |house| Ok(house.remove_employee(egn)))
        .await?;

    if removed.is_some() {
        info!(house = %key, "Employee removed");
        Ok(format!("Removed {}", egn))
    } else {
        warn!(house = %key, "Employee not found for removal");
        Ok(format!("No employee {}", egn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{registry_with_house, test_db};
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_add_validates_egn() {
        let db = test_db().await;
        let registry = registry_with_house(&db).await;

        let err = add(registry, "Main Street", "7501020019", Role::Operator)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        add(registry, "Main Street", "7501020018", Role::Operator).await.unwrap();
        let err = add(registry, "Main Street", "7501020018", Role::Manager)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let house = registry.find_house("Main Street").await.unwrap().house;
        assert_eq!(house.employees().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let db = test_db().await;
        let registry = registry_with_house(&db).await;
        add(registry, "Main Street", "8003050020", Role::Operator).await.unwrap();

        update(registry, "Main Street", "8003050020", Role::Manager).await.unwrap();
        let house = registry.find_house("Main Street").await.unwrap().house;
        assert_eq!(house.employee("8003050020").unwrap().role(), Role::Manager);

        let err = update(registry, "Main Street", "7501020018", Role::Manager)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        assert_eq!(
            remove(registry, "Main Street", "7501020018").await.unwrap(),
            "No employee 7501020018"
        );
        remove(registry, "Main Street", "8003050020").await.unwrap();
        assert_eq!(
            list(registry, "Main Street").await.unwrap(),
            "'Main Street' has no employees"
        );
    }
}
