use serde::{Deserialize, Serialize};

use crate::domain::ids;

/// A token contract accepted as auction currency. Name and platform flag are
/// resolved once at creation; the symbol may be back-filled later but an
/// already-set symbol is never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Lowercase token contract address
    pub address: String,
    /// Display name from the token contract; empty when the read reverted
    pub name: String,
    /// Token symbol, back-filled on first successful read
    pub symbol: Option<String>,
    /// Whether this is the marketplace's native platform token
    pub is_platform_token: bool,
}

impl PaymentMethod {
    /// Create a blank payment method for the given token address
    pub fn new(token_address: &str) -> Self {
        Self {
            address: ids::payment_method_id(token_address),
            name: String::new(),
            symbol: None,
            is_platform_token: false,
        }
    }
}
