use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a bid; a Dropped or Accepted bid never becomes Active again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidStatus {
    Active,
    Dropped,
    Accepted,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Active => "ACTIVE",
            BidStatus::Dropped => "DROPPED",
            BidStatus::Accepted => "ACCEPTED",
        }
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BidStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(BidStatus::Active),
            "DROPPED" => Ok(BidStatus::Dropped),
            "ACCEPTED" => Ok(BidStatus::Accepted),
            other => Err(format!("unknown bid status: {}", other)),
        }
    }
}

/// Projected state of an offer against an open auction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    /// Composite id: auction id + ordinal
    pub id: String,
    /// The auction this bid was made against (Auction id)
    pub auction: String,
    /// The bid's NFT (Nft id)
    pub nft: String,
    /// Raw token contract address of the NFT
    pub nft_address: String,
    /// Auction owner at bid time (User id)
    pub seller: String,
    /// Bidding party (User id)
    pub bidder: String,
    pub bid_value: BigDecimal,
    pub status: BidStatus,
    pub block_number: u64,
    /// Block timestamp of placement (epoch seconds)
    pub created_at: u64,
    /// Set when the bid is dropped or accepted
    pub closed_at: Option<u64>,
}
