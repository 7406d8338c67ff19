use dotenv::dotenv;
use std::env;

/// Configuration for the JSON-RPC endpoint used for contract reads
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Ethereum JSON-RPC URL
    pub url: String,
}

/// Configuration for the marketplace contracts
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    /// Marketplace contract address (category reads are issued against it)
    pub address: String,
    /// Address of the platform's native payment token
    pub platform_token: String,
}

/// Configuration for the database
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL; empty means the in-memory store is used
    pub url: String,
}

/// Configuration for event replay
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Capacity of the event channel feeding the projector
    pub channel_capacity: usize,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON-RPC configuration
    pub rpc: RpcConfig,
    /// Marketplace contract configuration
    pub marketplace: MarketplaceConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Replay configuration
    pub replay: ReplayConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        // Ensure .env file is loaded
        dotenv().ok();

        let rpc_config = RpcConfig {
            url: env::var("ETH_RPC_URL").unwrap_or_else(|_| "http://localhost:8545".to_string()),
        };

        // Addresses are kept lowercase; all derived ids are lowercase hex
        let marketplace_config = MarketplaceConfig {
            address: env::var("MARKETPLACE_ADDRESS")
                .unwrap_or_else(|_| "0x0000000000000000000000000000000000000000".to_string())
                .to_lowercase(),
            platform_token: env::var("PLATFORM_TOKEN_ADDRESS")
                .unwrap_or_else(|_| "0x0000000000000000000000000000000000000000".to_string())
                .to_lowercase(),
        };

        let database_config = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_default(),
        };

        let replay_config = ReplayConfig {
            channel_capacity: env::var("EVENT_CHANNEL_CAPACITY")
                .unwrap_or_else(|_| "256".to_string())
                .parse::<usize>()
                .unwrap_or(256),
        };

        Self {
            rpc: rpc_config,
            marketplace: marketplace_config,
            database: database_config,
            replay: replay_config,
        }
    }
}
