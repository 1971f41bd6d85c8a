//! Migrate command handler
//!
//! Handles database migration operations including dry-run and rollback.
//! Migrations run on a synchronous `PgConnection` inside `spawn_blocking`.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;

use crate::config::StorageBackend;
use crate::config::settings::Settings;
use crate::db::{MIGRATIONS, run_pending_migrations};
use crate::error::{AppError, AppResult};

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    /// Create a new migrate command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command with dry-run and rollback support
    ///
    /// # Errors
    /// - `Validation` when the memory backend is configured or `rollback` is 0
    /// - `Database` for connection and migration failures
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        if self.config.database.backend == StorageBackend::Memory {
            return Err(AppError::Validation {
                field: "database.backend".to_string(),
                reason: "Migrations require the postgres backend; the memory backend has no schema"
                    .to_string(),
            });
        }

        self.config.database.validate()?;

        if dry_run {
            return self.show_pending_migrations().await;
        }

        match rollback {
            Some(steps) => self.rollback_migrations(steps).await,
            None => self.run_migrations().await,
        }
    }

    /// Show pending migrations without applying them
    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let pending = self
            .with_connection("check pending migrations", |conn| {
                let pending = conn.pending_migrations(MIGRATIONS).map_err(migration_error)?;
                Ok(pending.iter().map(|m| m.name().to_string()).collect::<Vec<_>>())
            })
            .await?;

        if pending.is_empty() {
            println!("✓ No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {name}");
            }
            println!("\nRun without --dry-run to apply these migrations");
        }

        Ok(())
    }

    /// Run pending migrations
    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");

        let applied = run_pending_migrations(&self.config.database.url).await?;

        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for migration in &applied {
                println!("  - {migration}");
            }
        }

        tracing::info!(applied = applied.len(), "Database migrations completed");
        Ok(())
    }

    /// Rollback the specified number of migrations
    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        if steps == 0 {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        println!("Rolling back {steps} migration(s)...");

        let reverted = self
            .with_connection("revert migrations", move |conn| {
                let applied = conn.applied_migrations().map_err(migration_error)?;
                if applied.len() < steps as usize {
                    return Err(AppError::Validation {
                        field: "rollback_steps".to_string(),
                        reason: format!(
                            "Cannot rollback {steps} migrations - only {} applied migrations available",
                            applied.len()
                        ),
                    });
                }

                let mut reverted = Vec::with_capacity(steps as usize);
                for _ in 0..steps {
                    let version = conn
                        .revert_last_migration(MIGRATIONS)
                        .map_err(migration_error)?;
                    reverted.push(version.to_string());
                }
                Ok(reverted)
            })
            .await?;

        for version in &reverted {
            println!("  - reverted {version}");
        }
        println!("✓ Rolled back {} migration(s)", reverted.len());

        tracing::info!(reverted = reverted.len(), "Database migration rollback completed");
        Ok(())
    }

    /// Runs `f` on a fresh blocking connection to the configured database.
    async fn with_connection<T, F>(&self, operation: &'static str, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
    {
        let database_url = self.config.database.url.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn =
                PgConnection::establish(&database_url).map_err(|e| AppError::Database {
                    operation: format!("establish connection to {operation}"),
                    source: anyhow::anyhow!("Connection error: {e}"),
                })?;
            f(&mut conn).map_err(|e| match e {
                AppError::Database { source, .. } => AppError::Database {
                    operation: operation.to_string(),
                    source,
                },
                other => other,
            })
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}

fn migration_error(e: Box<dyn std::error::Error + Send + Sync>) -> AppError {
    AppError::Database {
        operation: "migration".to_string(),
        source: anyhow::anyhow!("Migration error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config
    }

    #[test]
    fn test_migrate_handler_new() {
        let config = create_valid_config();
        let handler = MigrateCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_migrate_rejects_memory_backend() {
        let mut config = Settings::default();
        config.database.backend = StorageBackend::Memory;

        let result = MigrateCommandHandler::new(config).execute(false, None).await;
        match result {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "database.backend"),
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_migrate_rejects_invalid_database_config() {
        let config = Settings::default();

        let result = MigrateCommandHandler::new(config).execute(true, None).await;
        match result {
            Err(AppError::Configuration { key, .. }) => assert_eq!(key, "database.url"),
            other => panic!("Expected configuration error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_migrate_handler_zero_rollback_steps() {
        let handler = MigrateCommandHandler::new(create_valid_config());

        match handler.execute(false, Some(0)).await {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback_steps");
                assert!(reason.contains("must be greater than 0"));
            }
            other => panic!("Expected validation error for zero rollback steps, got {other:?}"),
        }
    }
}
