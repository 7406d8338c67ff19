use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Category;

/// Lifecycle of an auction; transitions are monotone, an auction never
/// leaves Sold or Cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuctionStatus {
    Open,
    Sold,
    Cancelled,
}

impl AuctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Open => "OPEN",
            AuctionStatus::Sold => "SOLD",
            AuctionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuctionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(AuctionStatus::Open),
            "SOLD" => Ok(AuctionStatus::Sold),
            "CANCELLED" => Ok(AuctionStatus::Cancelled),
            other => Err(format!("unknown auction status: {}", other)),
        }
    }
}

/// Projected state of a listing of one NFT for sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auction {
    /// Lowercase hex id from the event
    pub id: String,
    /// The listed NFT (Nft id)
    pub nft: String,
    /// Raw token contract address of the listed NFT
    pub nft_address: String,
    /// Hash of the transaction that created the auction
    pub tx_hash: String,
    /// Seller (User id)
    pub owner: String,
    /// Buyer (User id); the zero-address sentinel when cancelled
    pub buyer: Option<String>,
    pub status: AuctionStatus,
    pub category: Option<Category>,
    pub base_price: BigDecimal,
    pub royalty_fees: BigDecimal,
    /// PaymentMethod id
    pub payment_method: String,
    pub block_number: u64,
    /// Block timestamp of creation (epoch seconds)
    pub created_at: u64,
    pub closed_at: Option<u64>,
    pub expires_at: Option<u64>,
    /// Bid ids in arrival order; the last one is the only candidate winner
    pub bids: Vec<String>,
    /// Monotone bid counter; the next bid's ordinal. Kept explicitly rather
    /// than derived from `bids.len()` so persistence order cannot skew ids.
    pub bid_count: u64,
    pub sold_price: Option<BigDecimal>,
}

impl Auction {
    /// Create a blank open auction with the given id
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_lowercase(),
            nft: String::new(),
            nft_address: String::new(),
            tx_hash: String::new(),
            owner: String::new(),
            buyer: None,
            status: AuctionStatus::Open,
            category: None,
            base_price: BigDecimal::from(0),
            royalty_fees: BigDecimal::from(0),
            payment_method: String::new(),
            block_number: 0,
            created_at: 0,
            closed_at: None,
            expires_at: None,
            bids: Vec::new(),
            bid_count: 0,
            sold_price: None,
        }
    }
}
