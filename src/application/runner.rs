use log::{error, info};
use tokio::sync::mpsc::Receiver;

use crate::domain::errors::ProjectionError;
use crate::domain::models::EventEnvelope;
use crate::domain::services::Projector;

/// Drives the projector over an ordered event stream.
///
/// Events are consumed one at a time by a single consumer; "the last bid" is
/// only well-defined because handlers never run concurrently. A projection
/// error halts the run: past a data-integrity failure every later transition
/// on the affected entities would be built on a wrong state.
pub struct ProjectionRunner {
    projector: Projector,
}

impl ProjectionRunner {
    pub fn new(projector: Projector) -> Self {
        Self { projector }
    }

    /// Project events until the channel closes. Returns the number of
    /// events applied.
    pub async fn run(&self, mut events: Receiver<EventEnvelope>) -> Result<u64, ProjectionError> {
        let mut applied: u64 = 0;
        while let Some(envelope) = events.recv().await {
            let kind = envelope.event.kind();
            if let Err(e) = self.projector.apply(&envelope).await {
                error!(
                    "Projection failed for {} at block {}: {}",
                    kind, envelope.block_number, e
                );
                return Err(e);
            }
            applied += 1;
        }
        info!("Event stream drained after {} events", applied);
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use bigdecimal::BigDecimal;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    use super::*;
    use crate::domain::gateway::{ContractGateway, GatewayError, PaymentBreakdown};
    use crate::domain::models::{AuctionStatus, MarketplaceEvent};
    use crate::domain::store::EntityStore;
    use crate::infrastructure::persistence::MemoryStore;

    /// Gateway whose every read reverts
    struct RevertingGateway;

    #[async_trait]
    impl ContractGateway for RevertingGateway {
        async fn token_symbol(&self, _: &str) -> Result<String, GatewayError> {
            Err(GatewayError::Reverted)
        }
        async fn token_name(&self, _: &str) -> Result<String, GatewayError> {
            Err(GatewayError::Reverted)
        }
        async fn token_uri(&self, _: &str, _: &str) -> Result<String, GatewayError> {
            Err(GatewayError::Reverted)
        }
        async fn category(&self, _: &str) -> Result<u64, GatewayError> {
            Err(GatewayError::Reverted)
        }
        async fn payment_breakdown(
            &self,
            _: &str,
            _: &str,
        ) -> Result<PaymentBreakdown, GatewayError> {
            Err(GatewayError::Reverted)
        }
        fn is_platform_token(&self, _: &str) -> bool {
            false
        }
    }

    fn envelope(block: u64, event: MarketplaceEvent) -> EventEnvelope {
        EventEnvelope {
            block_number: block,
            block_timestamp: 1_000 + block,
            tx_sender: "0xseller".to_string(),
            tx_hash: "0xtx".to_string(),
            event,
        }
    }

    #[tokio::test]
    async fn runs_events_in_delivery_order() {
        let store = Arc::new(MemoryStore::new());
        let runner = ProjectionRunner::new(Projector::new(
            store.clone(),
            Arc::new(RevertingGateway),
        ));

        let (tx, rx) = mpsc::channel(8);
        tx.send(envelope(
            1,
            MarketplaceEvent::AuctionCreated {
                auction_id: "0x1".to_string(),
                token: "0xnft".to_string(),
                token_id: "5".to_string(),
                base_price: BigDecimal::from(100),
                royalty_fees: BigDecimal::from(3),
                payment_method: "0xtoken".to_string(),
                royalty_recipient: "0xartist".to_string(),
            },
        ))
        .await
        .unwrap();
        tx.send(envelope(
            2,
            MarketplaceEvent::PriceUpdated {
                auction_id: "0x1".to_string(),
                new_price: BigDecimal::from(150),
            },
        ))
        .await
        .unwrap();
        drop(tx);

        let applied = runner.run(rx).await.unwrap();
        assert_eq!(applied, 2);

        let auction = store.auction("0x1").await.unwrap().unwrap();
        assert_eq!(auction.status, AuctionStatus::Open);
        assert_eq!(auction.base_price, BigDecimal::from(150));
    }

    #[tokio::test]
    async fn halts_on_missing_required_entity() {
        let store = Arc::new(MemoryStore::new());
        let runner = ProjectionRunner::new(Projector::new(
            store.clone(),
            Arc::new(RevertingGateway),
        ));

        let (tx, rx) = mpsc::channel(8);
        tx.send(envelope(
            1,
            MarketplaceEvent::BidMade {
                auction_id: "0xdead".to_string(),
                token: "0xnft".to_string(),
                token_id: "5".to_string(),
                bid_value: BigDecimal::from(10),
            },
        ))
        .await
        .unwrap();
        drop(tx);

        assert!(runner.run(rx).await.is_err());
    }
}
