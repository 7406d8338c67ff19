use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// A marketplace contract event together with its block context.
///
/// Envelopes arrive strictly in blockchain order; the transaction sender is
/// the acting party for handlers that create users (auction owner, bidder).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Height of the enclosing block
    pub block_number: u64,
    /// Timestamp of the enclosing block (epoch seconds)
    pub block_timestamp: u64,
    /// Address that sent the enclosing transaction
    pub tx_sender: String,
    /// Hash of the enclosing transaction
    pub tx_hash: String,
    /// The decoded event payload
    pub event: MarketplaceEvent,
}

/// The marketplace events this projector understands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MarketplaceEvent {
    AuctionCreated {
        auction_id: String,
        token: String,
        /// Decimal token id (u256 on chain)
        token_id: String,
        base_price: BigDecimal,
        royalty_fees: BigDecimal,
        payment_method: String,
        royalty_recipient: String,
    },
    Cancelled {
        auction_id: String,
    },
    BidMade {
        auction_id: String,
        token: String,
        token_id: String,
        bid_value: BigDecimal,
    },
    Executed {
        auction_id: String,
        token: String,
        token_id: String,
        owner_payment: BigDecimal,
        creator_payment: BigDecimal,
    },
    UpdatePaymentMethod {
        auction_id: String,
        payment_method: String,
    },
    PriceUpdated {
        auction_id: String,
        new_price: BigDecimal,
    },
    FeesUpdated {
        auction_id: String,
        new_fees: BigDecimal,
    },
}

impl MarketplaceEvent {
    /// Name of the event kind, for logs and error reports
    pub fn kind(&self) -> &'static str {
        match self {
            MarketplaceEvent::AuctionCreated { .. } => "AuctionCreated",
            MarketplaceEvent::Cancelled { .. } => "Cancelled",
            MarketplaceEvent::BidMade { .. } => "BidMade",
            MarketplaceEvent::Executed { .. } => "Executed",
            MarketplaceEvent::UpdatePaymentMethod { .. } => "UpdatePaymentMethod",
            MarketplaceEvent::PriceUpdated { .. } => "PriceUpdated",
            MarketplaceEvent::FeesUpdated { .. } => "FeesUpdated",
        }
    }
}
