use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::sync::Arc;

use super::Projector;
use crate::domain::errors::ProjectionError;
use crate::domain::gateway::{ContractGateway, GatewayError, PaymentBreakdown};
use crate::domain::ids;
use crate::domain::models::{
    AuctionStatus, BidStatus, Category, EventEnvelope, MarketplaceEvent,
};
use crate::domain::store::EntityStore;
use crate::infrastructure::persistence::MemoryStore;

/// Gateway stub with canned responses; a `None` field means the call reverts
#[derive(Default)]
struct StubGateway {
    symbol: Option<String>,
    name: Option<String>,
    uri: Option<String>,
    category: Option<u64>,
    breakdown: Option<PaymentBreakdown>,
    platform_token: String,
}

#[async_trait]
impl ContractGateway for StubGateway {
    async fn token_symbol(&self, _: &str) -> Result<String, GatewayError> {
        self.symbol.clone().ok_or(GatewayError::Reverted)
    }

    async fn token_name(&self, _: &str) -> Result<String, GatewayError> {
        self.name.clone().ok_or(GatewayError::Reverted)
    }

    async fn token_uri(&self, _: &str, _: &str) -> Result<String, GatewayError> {
        self.uri.clone().ok_or(GatewayError::Reverted)
    }

    async fn category(&self, _: &str) -> Result<u64, GatewayError> {
        self.category.ok_or(GatewayError::Reverted)
    }

    async fn payment_breakdown(
        &self,
        _: &str,
        _: &str,
    ) -> Result<PaymentBreakdown, GatewayError> {
        self.breakdown.clone().ok_or(GatewayError::Reverted)
    }

    fn is_platform_token(&self, token_address: &str) -> bool {
        ids::payment_method_id(token_address) == self.platform_token
    }
}

fn answering_gateway() -> StubGateway {
    StubGateway {
        symbol: Some("DFY".to_string()),
        name: Some("Delfy Token".to_string()),
        uri: Some("ipfs://meta/5".to_string()),
        category: Some(1),
        breakdown: Some(PaymentBreakdown {
            platform_cut: BigDecimal::from(2),
            referral_bonus: BigDecimal::from(1),
            cash_back: BigDecimal::from(3),
            total_value: BigDecimal::from(20),
        }),
        platform_token: "0xtoken".to_string(),
    }
}

fn setup(gateway: StubGateway) -> (Arc<MemoryStore>, Projector) {
    let store = Arc::new(MemoryStore::new());
    let projector = Projector::new(store.clone(), Arc::new(gateway));
    (store, projector)
}

fn envelope(block: u64, sender: &str, event: MarketplaceEvent) -> EventEnvelope {
    EventEnvelope {
        block_number: block,
        block_timestamp: 1_000 + block,
        tx_sender: sender.to_string(),
        tx_hash: format!("0xtx{}", block),
        event,
    }
}

fn auction_created(block: u64) -> EventEnvelope {
    envelope(
        block,
        "0xSeller",
        MarketplaceEvent::AuctionCreated {
            auction_id: "0x1".to_string(),
            token: "0xNFT".to_string(),
            token_id: "5".to_string(),
            base_price: BigDecimal::from(100),
            royalty_fees: BigDecimal::from(3),
            payment_method: "0xToken".to_string(),
            royalty_recipient: "0xArtist".to_string(),
        },
    )
}

fn bid_made(block: u64, sender: &str, value: u32) -> EventEnvelope {
    envelope(
        block,
        sender,
        MarketplaceEvent::BidMade {
            auction_id: "0x1".to_string(),
            token: "0xNFT".to_string(),
            token_id: "5".to_string(),
            bid_value: BigDecimal::from(value),
        },
    )
}

fn executed(block: u64) -> EventEnvelope {
    envelope(
        block,
        "0xSeller",
        MarketplaceEvent::Executed {
            auction_id: "0x1".to_string(),
            token: "0xNFT".to_string(),
            token_id: "5".to_string(),
            owner_payment: BigDecimal::from(15),
            creator_payment: BigDecimal::from(2),
        },
    )
}

#[tokio::test]
async fn auction_created_projects_the_full_graph() {
    let (store, projector) = setup(answering_gateway());

    projector.apply(&auction_created(1)).await.unwrap();

    let auction = store.auction("0x1").await.unwrap().unwrap();
    assert_eq!(auction.status, AuctionStatus::Open);
    assert_eq!(auction.base_price, BigDecimal::from(100));
    assert_eq!(auction.royalty_fees, BigDecimal::from(3));
    assert_eq!(auction.owner, "0xseller");
    assert_eq!(auction.payment_method, "0xtoken");
    assert_eq!(auction.category, Some(Category::Music));
    assert_eq!(auction.block_number, 1);
    assert_eq!(auction.created_at, 1_001);
    assert_eq!(auction.nft, "0xnft:5");

    let nft = store.nft("0xnft:5").await.unwrap().unwrap();
    assert_eq!(nft.active_order.as_deref(), Some("0x1"));
    assert_eq!(nft.owner, "0xseller");
    assert_eq!(nft.royalty_recipient, "0xartist");
    assert_eq!(nft.token_uri.as_deref(), Some("ipfs://meta/5"));
    assert_eq!(nft.orders, vec!["0x1".to_string()]);

    let seller = store.user("0xseller").await.unwrap().unwrap();
    assert_eq!(seller.active_sell_orders, vec!["0x1".to_string()]);

    let method = store.payment_method("0xtoken").await.unwrap().unwrap();
    assert_eq!(method.name, "Delfy Token");
    assert!(method.is_platform_token);

    let payment = store.payment("0x1").await.unwrap().unwrap();
    assert_eq!(payment.total_value, BigDecimal::from(100));
    assert_eq!(payment.payment_method, "0xtoken");

    let history = store.history("0xnft:5").await.unwrap().unwrap();
    assert_eq!(history.current_price, BigDecimal::from(100));
    assert_eq!(history.payment_method, "0xtoken");
    assert_eq!(history.timestamp, 1_001);
    assert_eq!(history.previous_owner, None);
}

#[tokio::test]
async fn auction_created_is_idempotent_under_redelivery() {
    let (store, projector) = setup(answering_gateway());

    projector.apply(&auction_created(1)).await.unwrap();
    let auction_first = store.auction("0x1").await.unwrap().unwrap();
    let nft_first = store.nft("0xnft:5").await.unwrap().unwrap();
    let payment_first = store.payment("0x1").await.unwrap().unwrap();
    let history_first = store.history("0xnft:5").await.unwrap().unwrap();
    let seller_first = store.user("0xseller").await.unwrap().unwrap();

    projector.apply(&auction_created(1)).await.unwrap();
    assert_eq!(store.auction("0x1").await.unwrap().unwrap(), auction_first);
    assert_eq!(store.nft("0xnft:5").await.unwrap().unwrap(), nft_first);
    assert_eq!(store.payment("0x1").await.unwrap().unwrap(), payment_first);
    assert_eq!(
        store.history("0xnft:5").await.unwrap().unwrap(),
        history_first
    );
    assert_eq!(store.user("0xseller").await.unwrap().unwrap(), seller_first);
}

#[tokio::test]
async fn auction_created_survives_reverting_reads() {
    let (store, projector) = setup(StubGateway::default());

    projector.apply(&auction_created(1)).await.unwrap();

    let auction = store.auction("0x1").await.unwrap().unwrap();
    assert_eq!(auction.status, AuctionStatus::Open);
    assert_eq!(auction.category, None);

    let nft = store.nft("0xnft:5").await.unwrap().unwrap();
    assert_eq!(nft.token_uri, None);

    let method = store.payment_method("0xtoken").await.unwrap().unwrap();
    assert_eq!(method.name, "");
}

#[tokio::test]
async fn only_the_most_recent_bid_stays_active() {
    let (store, projector) = setup(answering_gateway());
    projector.apply(&auction_created(1)).await.unwrap();

    projector.apply(&bid_made(2, "0xBidderA", 10)).await.unwrap();
    projector.apply(&bid_made(3, "0xBidderB", 20)).await.unwrap();
    projector.apply(&bid_made(4, "0xBidderA", 30)).await.unwrap();

    let first = store.bid("0x1:0").await.unwrap().unwrap();
    assert_eq!(first.status, BidStatus::Dropped);
    assert_eq!(first.bid_value, BigDecimal::from(10));
    assert_eq!(first.closed_at, Some(1_003));

    let second = store.bid("0x1:1").await.unwrap().unwrap();
    assert_eq!(second.status, BidStatus::Dropped);
    assert_eq!(second.closed_at, Some(1_004));

    let third = store.bid("0x1:2").await.unwrap().unwrap();
    assert_eq!(third.status, BidStatus::Active);
    assert_eq!(third.bid_value, BigDecimal::from(30));
    assert_eq!(third.closed_at, None);

    let auction = store.auction("0x1").await.unwrap().unwrap();
    assert_eq!(auction.bid_count, 3);
    assert_eq!(
        auction.bids,
        vec!["0x1:0".to_string(), "0x1:1".to_string(), "0x1:2".to_string()]
    );

    let nft = store.nft("0xnft:5").await.unwrap().unwrap();
    assert_eq!(nft.bids.len(), 3);

    let bidder_a = store.user("0xbiddera").await.unwrap().unwrap();
    assert_eq!(bidder_a.bids, vec!["0x1:0".to_string(), "0x1:2".to_string()]);
}

#[tokio::test]
async fn bid_on_unknown_auction_is_fatal() {
    let (_, projector) = setup(answering_gateway());

    let result = projector.apply(&bid_made(1, "0xBidderA", 10)).await;
    assert!(matches!(
        result,
        Err(ProjectionError::MissingEntity { kind: "auction", .. })
    ));
}

#[tokio::test]
async fn executed_accepts_the_most_recent_bid() {
    let (store, projector) = setup(answering_gateway());
    projector.apply(&auction_created(1)).await.unwrap();
    projector.apply(&bid_made(2, "0xBidderA", 10)).await.unwrap();
    projector.apply(&bid_made(3, "0xBidderB", 20)).await.unwrap();

    projector.apply(&executed(4)).await.unwrap();

    let auction = store.auction("0x1").await.unwrap().unwrap();
    assert_eq!(auction.status, AuctionStatus::Sold);
    assert_eq!(auction.buyer.as_deref(), Some("0xbidderb"));
    assert_eq!(auction.sold_price, Some(BigDecimal::from(20)));
    assert_eq!(auction.closed_at, Some(1_004));

    let winning = store.bid("0x1:1").await.unwrap().unwrap();
    assert_eq!(winning.status, BidStatus::Accepted);
    assert_eq!(winning.closed_at, Some(1_004));

    let history = store.history("0xnft:5").await.unwrap().unwrap();
    assert_eq!(history.previous_owner.as_deref(), Some("0xseller"));
    assert_eq!(history.current_owner.as_deref(), Some("0xbidderb"));
    assert_eq!(history.last_historical_price, Some(BigDecimal::from(20)));

    let buyer = store.user("0xbidderb").await.unwrap().unwrap();
    assert_eq!(buyer.nfts, vec!["0xnft:5".to_string()]);

    // The sale closes the NFT's active order
    let nft = store.nft("0xnft:5").await.unwrap().unwrap();
    assert_eq!(nft.active_order, None);

    let payment = store.payment("0x1").await.unwrap().unwrap();
    assert_eq!(payment.platform_cut, BigDecimal::from(2));
    assert_eq!(payment.referral_bonus, BigDecimal::from(1));
    assert_eq!(payment.cash_back, BigDecimal::from(3));
    assert_eq!(payment.owner_cash_back, BigDecimal::from(3));
    assert_eq!(payment.total_cash_back, BigDecimal::from(6));
    assert_eq!(payment.total_value, BigDecimal::from(20));
    // 15 from the event minus the 3 owner cash-back
    assert_eq!(payment.owner_payment, BigDecimal::from(12));
    assert_eq!(payment.royalty_cut, BigDecimal::from(2));
}

#[tokio::test]
async fn executed_with_reverting_breakdown_keeps_defaults() {
    let gateway = StubGateway {
        breakdown: None,
        ..answering_gateway()
    };
    let (store, projector) = setup(gateway);
    projector.apply(&auction_created(1)).await.unwrap();
    projector.apply(&bid_made(2, "0xBidderA", 10)).await.unwrap();

    projector.apply(&executed(3)).await.unwrap();

    let payment = store.payment("0x1").await.unwrap().unwrap();
    assert_eq!(payment.platform_cut, BigDecimal::from(0));
    assert_eq!(payment.cash_back, BigDecimal::from(0));
    assert_eq!(payment.total_cash_back, BigDecimal::from(0));
    // No cash-back could be read, the event value stands unreduced
    assert_eq!(payment.owner_payment, BigDecimal::from(15));
    assert_eq!(payment.royalty_cut, BigDecimal::from(2));
    // Still seeded from auction creation
    assert_eq!(payment.total_value, BigDecimal::from(100));
}

#[tokio::test]
async fn executed_without_bids_is_fatal() {
    let (_, projector) = setup(answering_gateway());
    projector.apply(&auction_created(1)).await.unwrap();

    let result = projector.apply(&executed(2)).await;
    assert!(matches!(
        result,
        Err(ProjectionError::MissingEntity { kind: "bid", .. })
    ));
}

#[tokio::test]
async fn update_payment_method_keeps_three_records_in_lockstep() {
    let (store, projector) = setup(answering_gateway());
    projector.apply(&auction_created(1)).await.unwrap();

    projector
        .apply(&envelope(
            2,
            "0xSeller",
            MarketplaceEvent::UpdatePaymentMethod {
                auction_id: "0x1".to_string(),
                payment_method: "0xOtherToken".to_string(),
            },
        ))
        .await
        .unwrap();

    let auction = store.auction("0x1").await.unwrap().unwrap();
    let payment = store.payment("0x1").await.unwrap().unwrap();
    let history = store.history("0xnft:5").await.unwrap().unwrap();
    assert_eq!(auction.payment_method, "0xothertoken");
    assert_eq!(payment.payment_method, "0xothertoken");
    assert_eq!(history.payment_method, "0xothertoken");

    let method = store.payment_method("0xothertoken").await.unwrap().unwrap();
    assert_eq!(method.symbol.as_deref(), Some("DFY"));
    assert_eq!(method.name, "Delfy Token");
}

#[tokio::test]
async fn update_payment_method_backfills_a_missing_symbol() {
    // Auction creation resolves the method's name but not its symbol
    let (store, projector) = setup(answering_gateway());
    projector.apply(&auction_created(1)).await.unwrap();
    let method = store.payment_method("0xtoken").await.unwrap().unwrap();
    assert_eq!(method.symbol, None);

    projector
        .apply(&envelope(
            2,
            "0xSeller",
            MarketplaceEvent::UpdatePaymentMethod {
                auction_id: "0x1".to_string(),
                payment_method: "0xToken".to_string(),
            },
        ))
        .await
        .unwrap();

    let method = store.payment_method("0xtoken").await.unwrap().unwrap();
    assert_eq!(method.symbol.as_deref(), Some("DFY"));
    // Name was already set at creation and stays untouched
    assert_eq!(method.name, "Delfy Token");
}

#[tokio::test]
async fn cancelled_on_unknown_auction_is_a_noop() {
    let (store, projector) = setup(answering_gateway());

    projector
        .apply(&envelope(
            1,
            "0xSeller",
            MarketplaceEvent::Cancelled {
                auction_id: "0xdead".to_string(),
            },
        ))
        .await
        .unwrap();

    assert!(store.auction("0xdead").await.unwrap().is_none());
    assert!(store.user(ids::ADDRESS_ZERO).await.unwrap().is_none());
}

#[tokio::test]
async fn cancelled_closes_an_open_auction() {
    let (store, projector) = setup(answering_gateway());
    projector.apply(&auction_created(1)).await.unwrap();

    projector
        .apply(&envelope(
            2,
            "0xSeller",
            MarketplaceEvent::Cancelled {
                auction_id: "0x1".to_string(),
            },
        ))
        .await
        .unwrap();

    let auction = store.auction("0x1").await.unwrap().unwrap();
    assert_eq!(auction.status, AuctionStatus::Cancelled);
    assert_eq!(auction.expires_at, Some(1_002));
    assert_eq!(auction.buyer.as_deref(), Some(ids::ADDRESS_ZERO));

    let nft = store.nft("0xnft:5").await.unwrap().unwrap();
    assert_eq!(nft.active_order, None);
}

#[tokio::test]
async fn closed_auctions_never_reopen() {
    let (store, projector) = setup(answering_gateway());
    projector.apply(&auction_created(1)).await.unwrap();
    projector.apply(&bid_made(2, "0xBidderA", 10)).await.unwrap();
    projector.apply(&executed(3)).await.unwrap();

    projector
        .apply(&envelope(
            4,
            "0xSeller",
            MarketplaceEvent::Cancelled {
                auction_id: "0x1".to_string(),
            },
        ))
        .await
        .unwrap();

    let auction = store.auction("0x1").await.unwrap().unwrap();
    assert_eq!(auction.status, AuctionStatus::Sold);
}

#[tokio::test]
async fn price_update_does_not_propagate_beyond_the_auction() {
    let (store, projector) = setup(answering_gateway());
    projector.apply(&auction_created(1)).await.unwrap();

    projector
        .apply(&envelope(
            2,
            "0xSeller",
            MarketplaceEvent::PriceUpdated {
                auction_id: "0x1".to_string(),
                new_price: BigDecimal::from(150),
            },
        ))
        .await
        .unwrap();

    let auction = store.auction("0x1").await.unwrap().unwrap();
    assert_eq!(auction.base_price, BigDecimal::from(150));
    // Payment and history keep the creation-time values
    let payment = store.payment("0x1").await.unwrap().unwrap();
    assert_eq!(payment.total_value, BigDecimal::from(100));
    let history = store.history("0xnft:5").await.unwrap().unwrap();
    assert_eq!(history.current_price, BigDecimal::from(100));
}

#[tokio::test]
async fn fees_update_sets_royalty_fees() {
    let (store, projector) = setup(answering_gateway());
    projector.apply(&auction_created(1)).await.unwrap();

    projector
        .apply(&envelope(
            2,
            "0xSeller",
            MarketplaceEvent::FeesUpdated {
                auction_id: "0x1".to_string(),
                new_fees: BigDecimal::from(7),
            },
        ))
        .await
        .unwrap();

    let auction = store.auction("0x1").await.unwrap().unwrap();
    assert_eq!(auction.royalty_fees, BigDecimal::from(7));
}

#[tokio::test]
async fn relisting_a_sold_nft_opens_a_second_order() {
    let (store, projector) = setup(answering_gateway());
    projector.apply(&auction_created(1)).await.unwrap();
    projector.apply(&bid_made(2, "0xBidderA", 10)).await.unwrap();
    projector.apply(&executed(3)).await.unwrap();

    projector
        .apply(&envelope(
            4,
            "0xBidderA",
            MarketplaceEvent::AuctionCreated {
                auction_id: "0x2".to_string(),
                token: "0xNFT".to_string(),
                token_id: "5".to_string(),
                base_price: BigDecimal::from(200),
                royalty_fees: BigDecimal::from(3),
                payment_method: "0xToken".to_string(),
                royalty_recipient: "0xArtist".to_string(),
            },
        ))
        .await
        .unwrap();

    let nft = store.nft("0xnft:5").await.unwrap().unwrap();
    assert_eq!(nft.active_order.as_deref(), Some("0x2"));
    assert_eq!(nft.owner, "0xbiddera");
    assert_eq!(nft.orders, vec!["0x1".to_string(), "0x2".to_string()]);

    let history = store.history("0xnft:5").await.unwrap().unwrap();
    assert_eq!(history.current_price, BigDecimal::from(200));
    // Snapshot of the last sale survives the re-listing
    assert_eq!(history.last_historical_price, Some(BigDecimal::from(10)));
}
