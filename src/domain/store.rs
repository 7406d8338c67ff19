use async_trait::async_trait;
use std::error::Error;
use std::fmt;

use crate::domain::models::{
    Auction, Bid, Nft, NftTokenHistory, Payment, PaymentMethod, User,
};

/// Error type for entity store operations
#[derive(Debug)]
pub enum StoreError {
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "Store backend error: {}", msg),
        }
    }
}

impl Error for StoreError {}

/// Durable load/save surface for all projected entities.
///
/// Saves are upserts, atomic per entity; there is no cross-entity
/// transaction. `get_or_create_*` persists the freshly created blank entity
/// and returns whether it was created, so callers can decide whether to
/// fetch one-time metadata.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_or_create_nft(
        &self,
        contract_address: &str,
        token_id: &str,
    ) -> Result<(Nft, bool), StoreError>;
    async fn nft(&self, id: &str) -> Result<Option<Nft>, StoreError>;
    async fn save_nft(&self, nft: &Nft) -> Result<(), StoreError>;

    async fn get_or_create_auction(&self, id: &str) -> Result<(Auction, bool), StoreError>;
    async fn auction(&self, id: &str) -> Result<Option<Auction>, StoreError>;
    async fn save_auction(&self, auction: &Auction) -> Result<(), StoreError>;

    async fn bid(&self, id: &str) -> Result<Option<Bid>, StoreError>;
    async fn save_bid(&self, bid: &Bid) -> Result<(), StoreError>;

    async fn get_or_create_user(&self, address: &str) -> Result<(User, bool), StoreError>;
    async fn user(&self, address: &str) -> Result<Option<User>, StoreError>;
    async fn save_user(&self, user: &User) -> Result<(), StoreError>;

    async fn get_or_create_payment_method(
        &self,
        token_address: &str,
    ) -> Result<(PaymentMethod, bool), StoreError>;
    async fn payment_method(
        &self,
        token_address: &str,
    ) -> Result<Option<PaymentMethod>, StoreError>;
    async fn save_payment_method(&self, method: &PaymentMethod) -> Result<(), StoreError>;

    async fn get_or_create_payment(&self, auction_id: &str)
        -> Result<(Payment, bool), StoreError>;
    async fn payment(&self, auction_id: &str) -> Result<Option<Payment>, StoreError>;
    async fn save_payment(&self, payment: &Payment) -> Result<(), StoreError>;

    async fn get_or_create_history(
        &self,
        nft_id: &str,
    ) -> Result<(NftTokenHistory, bool), StoreError>;
    async fn history(&self, nft_id: &str) -> Result<Option<NftTokenHistory>, StoreError>;
    async fn save_history(&self, history: &NftTokenHistory) -> Result<(), StoreError>;
}
