use sea_orm::{Database, DatabaseConnection};

use crate::config::AppConfig;
use crate::domain::store::StoreError;
use crate::utils::logging;

/// Manages the database connection
pub struct DbPool {
    connection: DatabaseConnection,
}

impl DbPool {
    /// Connect using the configured database URL
    pub async fn new(config: &AppConfig) -> Result<Self, StoreError> {
        logging::log_info(&format!(
            "Connecting to database: {}",
            config.database.url
        ));

        match Database::connect(&config.database.url).await {
            Ok(connection) => {
                logging::log_info("Database connection established successfully");
                Ok(DbPool { connection })
            }
            Err(e) => {
                logging::log_error(&format!("Failed to connect to database: {}", e));
                Err(StoreError::Backend(format!(
                    "Failed to connect to database: {}",
                    e
                )))
            }
        }
    }

    /// Returns the database connection
    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}
