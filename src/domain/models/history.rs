use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Latest price/ownership snapshot for one NFT. A single row per NFT,
/// overwritten on each relevant transition rather than appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftTokenHistory {
    /// Shared with the Nft id
    pub nft_id: String,
    pub token_address: String,
    pub token_id: String,
    /// PaymentMethod id
    pub payment_method: String,
    /// Block timestamp of the last snapshot (epoch seconds)
    pub timestamp: u64,
    /// Listing price of the most recent auction
    pub current_price: BigDecimal,
    pub previous_owner: Option<String>,
    pub current_owner: Option<String>,
    /// Price the NFT last changed hands at
    pub last_historical_price: Option<BigDecimal>,
}

impl NftTokenHistory {
    /// Create a blank history row for the given NFT
    pub fn new(nft_id: &str) -> Self {
        Self {
            nft_id: nft_id.to_string(),
            token_address: String::new(),
            token_id: String::new(),
            payment_method: String::new(),
            timestamp: 0,
            current_price: BigDecimal::from(0),
            previous_owner: None,
            current_owner: None,
            last_historical_price: None,
        }
    }
}
