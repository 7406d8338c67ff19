use std::sync::Arc;
use tokio::sync::mpsc;

use marketplace_indexer::application::{event_source, ProjectionRunner};
use marketplace_indexer::config::AppConfig;
use marketplace_indexer::domain::gateway::ContractGateway;
use marketplace_indexer::domain::services::Projector;
use marketplace_indexer::domain::store::EntityStore;
use marketplace_indexer::infrastructure::gateway::EthGateway;
use marketplace_indexer::infrastructure::persistence::{DbPool, MemoryStore, SqlEntityStore};
use marketplace_indexer::utils::logging;

#[tokio::main]
async fn main() {
    logging::init_logger();

    let config = AppConfig::from_env();

    // Empty DATABASE_URL selects the in-memory store (replay dry runs)
    let store: Arc<dyn EntityStore> = if config.database.url.is_empty() {
        logging::log_info("No database configured, projecting into memory");
        Arc::new(MemoryStore::new())
    } else {
        match DbPool::new(&config).await {
            Ok(db_pool) => Arc::new(SqlEntityStore::new(db_pool.get_connection().clone())),
            Err(e) => {
                logging::log_error(&format!("Failed to connect to database: {}", e));
                return;
            }
        }
    };

    let gateway: Arc<dyn ContractGateway> = match EthGateway::new(&config) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            logging::log_error(&format!("Failed to create contract gateway: {}", e));
            return;
        }
    };

    let runner = ProjectionRunner::new(Projector::new(store, gateway));

    let (tx, rx) = mpsc::channel(config.replay.channel_capacity);
    let reader = tokio::spawn(event_source::stream_stdin_events(tx));

    tokio::select! {
        result = runner.run(rx) => {
            match result {
                Ok(applied) => {
                    logging::log_info(&format!("Projection finished after {} events", applied));
                }
                Err(e) => logging::log_error(&format!("Projection halted: {}", e)),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            logging::log_info("Shutdown signal received, stopping projection");
        }
    }

    reader.abort();
}
