use serde::{Deserialize, Serialize};

use crate::domain::ids;

/// Projected state of a single NFT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nft {
    /// Composite id: contract address + token id
    pub id: String,
    /// Lowercase contract address
    pub contract_address: String,
    /// Decimal token id
    pub token_id: String,
    /// Current owner (User id)
    pub owner: String,
    /// Royalty recipient (User id)
    pub royalty_recipient: String,
    /// The currently open auction for this NFT, cleared on sale or cancellation
    pub active_order: Option<String>,
    /// Token URI fetched from the token contract, when the read succeeded
    pub token_uri: Option<String>,
    /// Every auction this NFT was ever listed under, in creation order
    pub orders: Vec<String>,
    /// Every bid ever made against this NFT, in arrival order
    pub bids: Vec<String>,
}

impl Nft {
    /// Create a blank NFT keyed by contract address and token id
    pub fn new(contract_address: &str, token_id: &str) -> Self {
        Self {
            id: ids::nft_id(contract_address, token_id),
            contract_address: contract_address.to_lowercase(),
            token_id: token_id.to_string(),
            owner: String::new(),
            royalty_recipient: String::new(),
            active_order: None,
            token_uri: None,
            orders: Vec::new(),
            bids: Vec::new(),
        }
    }
}
