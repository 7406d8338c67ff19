//! The event projector: one handler per marketplace event kind.
//!
//! Each handler loads the entities the event touches, applies the transition
//! rule, and writes every touched entity back. Handlers set absolute values
//! and guard collection appends, so redelivering an identical event leaves
//! the entity graph unchanged. External metadata reads are best-effort: a
//! reverted call is logged and the field keeps its default, the transition
//! itself never fails over it. Entities that prior history must have created
//! (the auction behind a bid, the payment row behind a sale) are fatal when
//! absent; only `Cancelled` tolerates an unknown auction.

use bigdecimal::BigDecimal;
use log::{debug, warn};
use std::sync::Arc;

use crate::domain::errors::ProjectionError;
use crate::domain::gateway::ContractGateway;
use crate::domain::ids;
use crate::domain::models::{
    Auction, AuctionStatus, Bid, BidStatus, Category, EventEnvelope, MarketplaceEvent,
};
use crate::domain::services::HistoryRecorder;
use crate::domain::store::EntityStore;

#[cfg(test)]
mod tests;

/// Projects marketplace events onto the entity store
pub struct Projector {
    store: Arc<dyn EntityStore>,
    gateway: Arc<dyn ContractGateway>,
    history: HistoryRecorder,
}

impl Projector {
    pub fn new(store: Arc<dyn EntityStore>, gateway: Arc<dyn ContractGateway>) -> Self {
        let history = HistoryRecorder::new(store.clone());
        Self {
            store,
            gateway,
            history,
        }
    }

    /// Apply one event to the entity graph
    pub async fn apply(&self, envelope: &EventEnvelope) -> Result<(), ProjectionError> {
        debug!(
            "Projecting {} at block {}",
            envelope.event.kind(),
            envelope.block_number
        );

        match &envelope.event {
            MarketplaceEvent::AuctionCreated {
                auction_id,
                token,
                token_id,
                base_price,
                royalty_fees,
                payment_method,
                royalty_recipient,
            } => {
                self.on_auction_created(
                    envelope,
                    auction_id,
                    token,
                    token_id,
                    base_price,
                    royalty_fees,
                    payment_method,
                    royalty_recipient,
                )
                .await
            }
            MarketplaceEvent::Cancelled { auction_id } => {
                self.on_cancelled(envelope, auction_id).await
            }
            MarketplaceEvent::BidMade {
                auction_id,
                token,
                token_id,
                bid_value,
            } => {
                self.on_bid_made(envelope, auction_id, token, token_id, bid_value)
                    .await
            }
            MarketplaceEvent::Executed {
                auction_id,
                token,
                token_id,
                owner_payment,
                creator_payment,
            } => {
                self.on_executed(
                    envelope,
                    auction_id,
                    token,
                    token_id,
                    owner_payment,
                    creator_payment,
                )
                .await
            }
            MarketplaceEvent::UpdatePaymentMethod {
                auction_id,
                payment_method,
            } => self.on_update_payment_method(auction_id, payment_method).await,
            MarketplaceEvent::PriceUpdated {
                auction_id,
                new_price,
            } => self.on_price_updated(auction_id, new_price).await,
            MarketplaceEvent::FeesUpdated {
                auction_id,
                new_fees,
            } => self.on_fees_updated(auction_id, new_fees).await,
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn on_auction_created(
        &self,
        envelope: &EventEnvelope,
        auction_id: &str,
        token: &str,
        token_id: &str,
        base_price: &BigDecimal,
        royalty_fees: &BigDecimal,
        payment_method: &str,
        royalty_recipient: &str,
    ) -> Result<(), ProjectionError> {
        let (mut auction, _) = self
            .store
            .get_or_create_auction(&ids::auction_id(auction_id))
            .await?;
        let (mut owner, _) = self.store.get_or_create_user(&envelope.tx_sender).await?;

        let (mut method, method_created) = self
            .store
            .get_or_create_payment_method(payment_method)
            .await?;
        if method_created {
            match self.gateway.token_name(&method.address).await {
                Ok(name) => method.name = name,
                Err(e) => warn!("Token name read failed for {}: {}", method.address, e),
            }
            method.is_platform_token = self.gateway.is_platform_token(&method.address);
        }

        match self.gateway.category(&auction.id).await {
            Ok(code) => auction.category = Some(Category::from_code(code)),
            Err(e) => warn!("Category read failed for auction {}: {}", auction.id, e),
        }

        let (mut nft, _) = self.store.get_or_create_nft(token, token_id).await?;
        let (royalty_user, _) = self.store.get_or_create_user(royalty_recipient).await?;
        nft.owner = owner.address.clone();
        nft.royalty_recipient = royalty_user.address;
        nft.active_order = Some(auction.id.clone());
        if !nft.orders.contains(&auction.id) {
            nft.orders.push(auction.id.clone());
        }
        match self.gateway.token_uri(&nft.contract_address, &nft.token_id).await {
            Ok(uri) => nft.token_uri = Some(uri),
            Err(e) => warn!("Token URI read failed for {}: {}", nft.id, e),
        }

        auction.nft = nft.id.clone();
        auction.nft_address = nft.contract_address.clone();
        auction.tx_hash = envelope.tx_hash.clone();
        auction.owner = owner.address.clone();
        auction.status = AuctionStatus::Open;
        auction.block_number = envelope.block_number;
        auction.created_at = envelope.block_timestamp;
        auction.base_price = base_price.clone();
        auction.royalty_fees = royalty_fees.clone();
        auction.payment_method = method.address.clone();

        if !owner.active_sell_orders.contains(&auction.id) {
            owner.active_sell_orders.push(auction.id.clone());
        }

        let (mut payment, _) = self.store.get_or_create_payment(&auction.id).await?;
        payment.total_value = base_price.clone();
        payment.payment_method = method.address.clone();

        self.store.save_payment_method(&method).await?;
        self.store.save_nft(&nft).await?;
        self.store.save_auction(&auction).await?;
        self.store.save_user(&owner).await?;
        self.store.save_payment(&payment).await?;
        self.history
            .seed(&nft, &auction, envelope.block_timestamp)
            .await?;

        Ok(())
    }

    async fn on_cancelled(
        &self,
        envelope: &EventEnvelope,
        auction_id: &str,
    ) -> Result<(), ProjectionError> {
        let id = ids::auction_id(auction_id);
        // Cancellation of an unknown or already-pruned auction is harmless
        let Some(mut auction) = self.store.auction(&id).await? else {
            debug!("Cancelled for unknown auction {}, ignoring", id);
            return Ok(());
        };
        if auction.status != AuctionStatus::Open {
            warn!(
                "Cancelled for auction {} in status {}, ignoring",
                auction.id, auction.status
            );
            return Ok(());
        }

        auction.status = AuctionStatus::Cancelled;
        auction.expires_at = Some(envelope.block_timestamp);
        let (sentinel, _) = self.store.get_or_create_user(ids::ADDRESS_ZERO).await?;
        auction.buyer = Some(sentinel.address);
        self.store.save_auction(&auction).await?;

        self.clear_active_order(&auction).await?;

        Ok(())
    }

    async fn on_bid_made(
        &self,
        envelope: &EventEnvelope,
        auction_id: &str,
        token: &str,
        token_id: &str,
        bid_value: &BigDecimal,
    ) -> Result<(), ProjectionError> {
        let id = ids::auction_id(auction_id);
        let mut auction = self
            .store
            .auction(&id)
            .await?
            .ok_or_else(|| ProjectionError::missing("auction", &id))?;

        // At most one ACTIVE bid per auction: the previous one is dropped
        if let Some(last_id) = auction.bids.last() {
            let mut last = self
                .store
                .bid(last_id)
                .await?
                .ok_or_else(|| ProjectionError::missing("bid", last_id.clone()))?;
            if last.status == BidStatus::Active {
                last.status = BidStatus::Dropped;
                last.closed_at = Some(envelope.block_timestamp);
                self.store.save_bid(&last).await?;
            }
        }

        let ordinal = auction.bid_count;
        let bid_id = ids::bid_id(&auction.id, ordinal);

        let (seller, _) = self.store.get_or_create_user(&auction.owner).await?;
        let (mut bidder, _) = self.store.get_or_create_user(&envelope.tx_sender).await?;

        let nft_id = ids::nft_id(token, token_id);
        let mut nft = self
            .store
            .nft(&nft_id)
            .await?
            .ok_or_else(|| ProjectionError::missing("nft", &nft_id))?;

        let bid = Bid {
            id: bid_id,
            auction: auction.id.clone(),
            nft: nft.id.clone(),
            nft_address: nft.contract_address.clone(),
            seller: seller.address,
            bidder: bidder.address.clone(),
            bid_value: bid_value.clone(),
            status: BidStatus::Active,
            block_number: envelope.block_number,
            created_at: envelope.block_timestamp,
            closed_at: None,
        };
        self.store.save_bid(&bid).await?;

        if !bidder.bids.contains(&bid.id) {
            bidder.bids.push(bid.id.clone());
        }
        self.store.save_user(&bidder).await?;

        if !nft.bids.contains(&bid.id) {
            nft.bids.push(bid.id.clone());
        }
        self.store.save_nft(&nft).await?;

        auction.bids.push(bid.id);
        auction.bid_count = ordinal + 1;
        self.store.save_auction(&auction).await?;

        Ok(())
    }

    async fn on_executed(
        &self,
        envelope: &EventEnvelope,
        auction_id: &str,
        token: &str,
        token_id: &str,
        owner_payment: &BigDecimal,
        creator_payment: &BigDecimal,
    ) -> Result<(), ProjectionError> {
        let id = ids::auction_id(auction_id);
        let mut auction = self
            .store
            .auction(&id)
            .await?
            .ok_or_else(|| ProjectionError::missing("auction", &id))?;
        if auction.status != AuctionStatus::Open {
            warn!(
                "Executed for auction {} in status {}, ignoring",
                auction.id, auction.status
            );
            return Ok(());
        }
        if auction.bid_count == 0 {
            return Err(ProjectionError::missing("bid", ids::bid_id(&auction.id, 0)));
        }

        // The most recent bid is the accepted one
        let winning_id = ids::bid_id(&auction.id, auction.bid_count - 1);
        let mut bid = self
            .store
            .bid(&winning_id)
            .await?
            .ok_or_else(|| ProjectionError::missing("bid", &winning_id))?;

        auction.status = AuctionStatus::Sold;
        auction.buyer = Some(bid.bidder.clone());
        auction.closed_at = Some(envelope.block_timestamp);
        auction.sold_price = Some(bid.bid_value.clone());
        bid.status = BidStatus::Accepted;
        bid.closed_at = Some(envelope.block_timestamp);
        self.store.save_bid(&bid).await?;
        self.store.save_auction(&auction).await?;

        self.history
            .record_sale(&auction.nft, &auction.owner, &bid.bidder, &bid.bid_value)
            .await?;

        let nft_id = ids::nft_id(token, token_id);
        let nft = self
            .store
            .nft(&nft_id)
            .await?
            .ok_or_else(|| ProjectionError::missing("nft", &nft_id))?;
        let (mut buyer, _) = self.store.get_or_create_user(&bid.bidder).await?;
        if !buyer.nfts.contains(&nft.id) {
            buyer.nfts.push(nft.id.clone());
        }
        self.store.save_user(&buyer).await?;

        self.clear_active_order(&auction).await?;

        let mut payment = self
            .store
            .payment(&auction.id)
            .await?
            .ok_or_else(|| ProjectionError::missing("payment", &auction.id))?;
        match self
            .gateway
            .payment_breakdown(&nft.contract_address, &auction.id)
            .await
        {
            Ok(breakdown) => {
                payment.platform_cut = breakdown.platform_cut;
                payment.referral_bonus = breakdown.referral_bonus;
                payment.owner_cash_back = breakdown.cash_back.clone();
                payment.cash_back = breakdown.cash_back;
                payment.total_value = breakdown.total_value;
            }
            Err(e) => warn!(
                "Payment breakdown read failed for auction {}: {}",
                auction.id, e
            ),
        }
        payment.owner_payment = owner_payment - &payment.owner_cash_back;
        payment.royalty_cut = creator_payment.clone();
        payment.total_cash_back = &payment.cash_back + &payment.owner_cash_back;
        self.store.save_payment(&payment).await?;

        Ok(())
    }

    async fn on_update_payment_method(
        &self,
        auction_id: &str,
        payment_method: &str,
    ) -> Result<(), ProjectionError> {
        let id = ids::auction_id(auction_id);
        let mut auction = self
            .store
            .auction(&id)
            .await?
            .ok_or_else(|| ProjectionError::missing("auction", &id))?;

        let (mut method, created) = self
            .store
            .get_or_create_payment_method(payment_method)
            .await?;
        if created {
            match self.gateway.token_symbol(&method.address).await {
                Ok(symbol) => method.symbol = Some(symbol),
                Err(e) => warn!("Token symbol read failed for {}: {}", method.address, e),
            }
            match self.gateway.token_name(&method.address).await {
                Ok(name) => method.name = name,
                Err(e) => warn!("Token name read failed for {}: {}", method.address, e),
            }
            method.is_platform_token = self.gateway.is_platform_token(&method.address);
        } else if method.symbol.is_none() {
            // Back-fill a missing symbol; an already-set one is never touched
            match self.gateway.token_symbol(&method.address).await {
                Ok(symbol) => method.symbol = Some(symbol),
                Err(e) => warn!("Token symbol read failed for {}: {}", method.address, e),
            }
        }
        self.store.save_payment_method(&method).await?;

        // Auction, its payment row, and its history row stay in lockstep
        auction.payment_method = method.address.clone();
        self.store.save_auction(&auction).await?;

        let mut payment = self
            .store
            .payment(&auction.id)
            .await?
            .ok_or_else(|| ProjectionError::missing("payment", &auction.id))?;
        payment.payment_method = method.address.clone();
        self.store.save_payment(&payment).await?;

        let mut history = self
            .store
            .history(&auction.nft)
            .await?
            .ok_or_else(|| ProjectionError::missing("nft token history", &auction.nft))?;
        history.payment_method = method.address;
        self.store.save_history(&history).await?;

        Ok(())
    }

    async fn on_price_updated(
        &self,
        auction_id: &str,
        new_price: &BigDecimal,
    ) -> Result<(), ProjectionError> {
        let id = ids::auction_id(auction_id);
        let mut auction = self
            .store
            .auction(&id)
            .await?
            .ok_or_else(|| ProjectionError::missing("auction", &id))?;
        auction.base_price = new_price.clone();
        self.store.save_auction(&auction).await?;
        Ok(())
    }

    async fn on_fees_updated(
        &self,
        auction_id: &str,
        new_fees: &BigDecimal,
    ) -> Result<(), ProjectionError> {
        let id = ids::auction_id(auction_id);
        let mut auction = self
            .store
            .auction(&id)
            .await?
            .ok_or_else(|| ProjectionError::missing("auction", &id))?;
        auction.royalty_fees = new_fees.clone();
        self.store.save_auction(&auction).await?;
        Ok(())
    }

    /// Drop the NFT's active-order pointer once its auction closed
    async fn clear_active_order(&self, auction: &Auction) -> Result<(), ProjectionError> {
        if auction.nft.is_empty() {
            return Ok(());
        }
        if let Some(mut nft) = self.store.nft(&auction.nft).await? {
            if nft.active_order.as_deref() == Some(auction.id.as_str()) {
                nft.active_order = None;
                self.store.save_nft(&nft).await?;
            }
        }
        Ok(())
    }
}
