use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Proceeds breakdown of one auction. Seeded with the base price at auction
/// creation and fully populated at sale execution from the on-chain
/// payment-split read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Shared with the auction id
    pub auction_id: String,
    pub total_value: BigDecimal,
    /// Seller's share net of their cash-back
    pub owner_payment: BigDecimal,
    pub royalty_cut: BigDecimal,
    pub platform_cut: BigDecimal,
    pub referral_bonus: BigDecimal,
    pub cash_back: BigDecimal,
    pub owner_cash_back: BigDecimal,
    pub total_cash_back: BigDecimal,
    /// PaymentMethod id
    pub payment_method: String,
}

impl Payment {
    /// Create a zeroed payment row for the given auction
    pub fn new(auction_id: &str) -> Self {
        Self {
            auction_id: auction_id.to_lowercase(),
            total_value: BigDecimal::from(0),
            owner_payment: BigDecimal::from(0),
            royalty_cut: BigDecimal::from(0),
            platform_cut: BigDecimal::from(0),
            referral_bonus: BigDecimal::from(0),
            cash_back: BigDecimal::from(0),
            owner_cash_back: BigDecimal::from(0),
            total_cash_back: BigDecimal::from(0),
            payment_method: String::new(),
        }
    }
}
