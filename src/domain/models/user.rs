use serde::{Deserialize, Serialize};

use crate::domain::ids;

/// Projected state of a wallet seen by the marketplace. Users are created
/// lazily on first reference; the zero address is a valid sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Lowercase wallet address
    pub address: String,
    /// NFTs bought through the marketplace, in purchase order
    pub nfts: Vec<String>,
    /// Bids placed, in placement order
    pub bids: Vec<String>,
    /// Auctions opened as seller, in creation order
    pub active_sell_orders: Vec<String>,
}

impl User {
    /// Create a blank user for the given wallet address
    pub fn new(address: &str) -> Self {
        Self {
            address: ids::user_id(address),
            nfts: Vec::new(),
            bids: Vec::new(),
            active_sell_orders: Vec::new(),
        }
    }
}
