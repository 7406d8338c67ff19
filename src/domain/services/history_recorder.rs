use bigdecimal::BigDecimal;
use std::sync::Arc;

use crate::domain::errors::ProjectionError;
use crate::domain::models::{Auction, Nft};
use crate::domain::store::EntityStore;

/// Maintains the single price/ownership snapshot row per NFT.
///
/// The row is overwritten in place: it is "latest snapshot", not a timeline.
pub struct HistoryRecorder {
    store: Arc<dyn EntityStore>,
}

impl HistoryRecorder {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Seed (or refresh) the snapshot when an auction opens
    pub async fn seed(
        &self,
        nft: &Nft,
        auction: &Auction,
        timestamp: u64,
    ) -> Result<(), ProjectionError> {
        let (mut history, _) = self.store.get_or_create_history(&nft.id).await?;
        history.token_address = nft.contract_address.clone();
        history.token_id = nft.token_id.clone();
        history.payment_method = auction.payment_method.clone();
        history.timestamp = timestamp;
        history.current_price = auction.base_price.clone();
        self.store.save_history(&history).await?;
        Ok(())
    }

    /// Record the ownership change when a sale executes. The row must have
    /// been seeded by the auction that is now closing.
    pub async fn record_sale(
        &self,
        nft_id: &str,
        previous_owner: &str,
        current_owner: &str,
        price: &BigDecimal,
    ) -> Result<(), ProjectionError> {
        let mut history = self
            .store
            .history(nft_id)
            .await?
            .ok_or_else(|| ProjectionError::missing("nft token history", nft_id))?;
        history.previous_owner = Some(previous_owner.to_string());
        history.current_owner = Some(current_owner.to_string());
        history.last_historical_price = Some(price.clone());
        self.store.save_history(&history).await?;
        Ok(())
    }
}
