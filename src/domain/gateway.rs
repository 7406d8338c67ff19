use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::error::Error;
use std::fmt;

/// Error type for contract read operations
#[derive(Debug)]
pub enum GatewayError {
    /// The call could not reach the node
    Transport(String),
    /// The node answered with a malformed or unexpected response
    Rpc(String),
    /// The contract call reverted; treated as a permanent metadata miss
    Reverted,
    /// The return data could not be decoded
    Decode(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(msg) => write!(f, "Transport error: {}", msg),
            GatewayError::Rpc(msg) => write!(f, "RPC error: {}", msg),
            GatewayError::Reverted => write!(f, "Contract call reverted"),
            GatewayError::Decode(msg) => write!(f, "Return data decode error: {}", msg),
        }
    }
}

impl Error for GatewayError {}

/// The 4-way split of a sale's proceeds as reported by the payment contract
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentBreakdown {
    pub platform_cut: BigDecimal,
    pub referral_bonus: BigDecimal,
    pub cash_back: BigDecimal,
    pub total_value: BigDecimal,
}

/// Read-only calls against the marketplace and token contracts for metadata
/// the event payload does not carry. Every call may revert; callers log the
/// miss and substitute a default, never failing the projection over it.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// ERC20 `symbol()` of a payment token
    async fn token_symbol(&self, token_address: &str) -> Result<String, GatewayError>;

    /// ERC20 `name()` of a payment token
    async fn token_name(&self, token_address: &str) -> Result<String, GatewayError>;

    /// ERC721 `tokenURI(tokenId)` of an NFT
    async fn token_uri(&self, contract_address: &str, token_id: &str)
        -> Result<String, GatewayError>;

    /// Marketplace `category(auctionId)` enum code
    async fn category(&self, auction_id: &str) -> Result<u64, GatewayError>;

    /// Payment contract `getPlatformCut(auctionId)` split
    async fn payment_breakdown(
        &self,
        contract_address: &str,
        auction_id: &str,
    ) -> Result<PaymentBreakdown, GatewayError>;

    /// Whether the token is the platform's native payment token. A pure
    /// local comparison, no contract call involved.
    fn is_platform_token(&self, token_address: &str) -> bool;
}
