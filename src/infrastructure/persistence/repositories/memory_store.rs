use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::ids;
use crate::domain::models::{
    Auction, Bid, Nft, NftTokenHistory, Payment, PaymentMethod, User,
};
use crate::domain::store::{EntityStore, StoreError};

#[derive(Default)]
struct Tables {
    nfts: HashMap<String, Nft>,
    auctions: HashMap<String, Auction>,
    bids: HashMap<String, Bid>,
    users: HashMap<String, User>,
    payment_methods: HashMap<String, PaymentMethod>,
    payments: HashMap<String, Payment>,
    histories: HashMap<String, NftTokenHistory>,
}

/// HashMap-backed entity store, used by tests and database-less replay runs
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get_or_create_nft(
        &self,
        contract_address: &str,
        token_id: &str,
    ) -> Result<(Nft, bool), StoreError> {
        let id = ids::nft_id(contract_address, token_id);
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.nfts.get(&id) {
            return Ok((existing.clone(), false));
        }
        let nft = Nft::new(contract_address, token_id);
        tables.nfts.insert(id, nft.clone());
        Ok((nft, true))
    }

    async fn nft(&self, id: &str) -> Result<Option<Nft>, StoreError> {
        Ok(self.tables.read().await.nfts.get(id).cloned())
    }

    async fn save_nft(&self, nft: &Nft) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .nfts
            .insert(nft.id.clone(), nft.clone());
        Ok(())
    }

    async fn get_or_create_auction(&self, id: &str) -> Result<(Auction, bool), StoreError> {
        let id = ids::auction_id(id);
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.auctions.get(&id) {
            return Ok((existing.clone(), false));
        }
        let auction = Auction::new(&id);
        tables.auctions.insert(id, auction.clone());
        Ok((auction, true))
    }

    async fn auction(&self, id: &str) -> Result<Option<Auction>, StoreError> {
        Ok(self.tables.read().await.auctions.get(id).cloned())
    }

    async fn save_auction(&self, auction: &Auction) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .auctions
            .insert(auction.id.clone(), auction.clone());
        Ok(())
    }

    async fn bid(&self, id: &str) -> Result<Option<Bid>, StoreError> {
        Ok(self.tables.read().await.bids.get(id).cloned())
    }

    async fn save_bid(&self, bid: &Bid) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .bids
            .insert(bid.id.clone(), bid.clone());
        Ok(())
    }

    async fn get_or_create_user(&self, address: &str) -> Result<(User, bool), StoreError> {
        let id = ids::user_id(address);
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.users.get(&id) {
            return Ok((existing.clone(), false));
        }
        let user = User::new(&id);
        tables.users.insert(id, user.clone());
        Ok((user, true))
    }

    async fn user(&self, address: &str) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(address).cloned())
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .users
            .insert(user.address.clone(), user.clone());
        Ok(())
    }

    async fn get_or_create_payment_method(
        &self,
        token_address: &str,
    ) -> Result<(PaymentMethod, bool), StoreError> {
        let id = ids::payment_method_id(token_address);
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.payment_methods.get(&id) {
            return Ok((existing.clone(), false));
        }
        let method = PaymentMethod::new(&id);
        tables.payment_methods.insert(id, method.clone());
        Ok((method, true))
    }

    async fn payment_method(
        &self,
        token_address: &str,
    ) -> Result<Option<PaymentMethod>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .payment_methods
            .get(token_address)
            .cloned())
    }

    async fn save_payment_method(&self, method: &PaymentMethod) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .payment_methods
            .insert(method.address.clone(), method.clone());
        Ok(())
    }

    async fn get_or_create_payment(
        &self,
        auction_id: &str,
    ) -> Result<(Payment, bool), StoreError> {
        let id = ids::auction_id(auction_id);
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.payments.get(&id) {
            return Ok((existing.clone(), false));
        }
        let payment = Payment::new(&id);
        tables.payments.insert(id, payment.clone());
        Ok((payment, true))
    }

    async fn payment(&self, auction_id: &str) -> Result<Option<Payment>, StoreError> {
        Ok(self.tables.read().await.payments.get(auction_id).cloned())
    }

    async fn save_payment(&self, payment: &Payment) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .payments
            .insert(payment.auction_id.clone(), payment.clone());
        Ok(())
    }

    async fn get_or_create_history(
        &self,
        nft_id: &str,
    ) -> Result<(NftTokenHistory, bool), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.histories.get(nft_id) {
            return Ok((existing.clone(), false));
        }
        let history = NftTokenHistory::new(nft_id);
        tables.histories.insert(nft_id.to_string(), history.clone());
        Ok((history, true))
    }

    async fn history(&self, nft_id: &str) -> Result<Option<NftTokenHistory>, StoreError> {
        Ok(self.tables.read().await.histories.get(nft_id).cloned())
    }

    async fn save_history(&self, history: &NftTokenHistory) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .histories
            .insert(history.nft_id.clone(), history.clone());
        Ok(())
    }
}
