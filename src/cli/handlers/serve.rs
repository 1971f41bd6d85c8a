//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::StorageBackend;
use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the serve command
    ///
    /// With `dry_run` the configuration is validated and summarized;
    /// otherwise the server runs until a shutdown signal arrives.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(&self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()?;
            return Ok(());
        }

        Server::new(self.config.clone()).run().await
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.database.backend {
            StorageBackend::Postgres => println!(
                "✓ Storage backend: postgres (pool {}..={} connections)",
                self.config.database.min_connections, self.config.database.max_connections
            ),
            StorageBackend::Memory => {
                println!("✓ Storage backend: memory (products are lost on shutdown)")
            }
        }
        println!("✓ Log level: {}", self.config.logger.level);

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
