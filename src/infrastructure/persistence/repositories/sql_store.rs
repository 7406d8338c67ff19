use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use serde_json::Value;
use std::str::FromStr;

use crate::domain::ids;
use crate::domain::models::{
    Auction, AuctionStatus, Bid, BidStatus, Category, Nft, NftTokenHistory, Payment,
    PaymentMethod, User,
};
use crate::domain::store::{EntityStore, StoreError};
use crate::infrastructure::persistence::entities::{
    auctions, bids, nft_token_histories, nfts, payment_methods, payments, prelude::*, users,
};

/// SeaORM-backed entity store. Every save is a find-then-insert-or-update
/// upsert, atomic per row.
#[derive(Clone)]
pub struct SqlEntityStore {
    conn: DatabaseConnection,
}

impl SqlEntityStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

fn db_err(e: sea_orm::DbErr) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn ids_to_json(ids: &[String]) -> Value {
    serde_json::json!(ids)
}

fn ids_from_json(value: &Value) -> Vec<String> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

fn nft_from_model(m: nfts::Model) -> Nft {
    Nft {
        id: m.id,
        contract_address: m.contract_address,
        token_id: m.token_id,
        owner: m.owner,
        royalty_recipient: m.royalty_recipient,
        active_order: m.active_order,
        token_uri: m.token_uri,
        orders: ids_from_json(&m.orders),
        bids: ids_from_json(&m.bids),
    }
}

fn nft_to_active(n: &Nft) -> nfts::ActiveModel {
    nfts::ActiveModel {
        id: Set(n.id.clone()),
        contract_address: Set(n.contract_address.clone()),
        token_id: Set(n.token_id.clone()),
        owner: Set(n.owner.clone()),
        royalty_recipient: Set(n.royalty_recipient.clone()),
        active_order: Set(n.active_order.clone()),
        token_uri: Set(n.token_uri.clone()),
        orders: Set(ids_to_json(&n.orders)),
        bids: Set(ids_to_json(&n.bids)),
        updated_at: Set(Utc::now().into()),
    }
}

fn auction_from_model(m: auctions::Model) -> Result<Auction, StoreError> {
    Ok(Auction {
        id: m.id,
        nft: m.nft_id,
        nft_address: m.nft_address,
        tx_hash: m.tx_hash,
        owner: m.owner,
        buyer: m.buyer,
        status: AuctionStatus::from_str(&m.status).map_err(StoreError::Backend)?,
        category: m.category.as_deref().map(Category::from_label),
        base_price: m.base_price,
        royalty_fees: m.royalty_fees,
        payment_method: m.payment_method,
        block_number: m.block_number as u64,
        created_at: m.created_at as u64,
        closed_at: m.closed_at.map(|t| t as u64),
        expires_at: m.expires_at.map(|t| t as u64),
        bids: ids_from_json(&m.bids),
        bid_count: m.bid_count as u64,
        sold_price: m.sold_price,
    })
}

fn auction_to_active(a: &Auction) -> auctions::ActiveModel {
    auctions::ActiveModel {
        id: Set(a.id.clone()),
        nft_id: Set(a.nft.clone()),
        nft_address: Set(a.nft_address.clone()),
        tx_hash: Set(a.tx_hash.clone()),
        owner: Set(a.owner.clone()),
        buyer: Set(a.buyer.clone()),
        status: Set(a.status.as_str().to_string()),
        category: Set(a.category.map(|c| c.as_str().to_string())),
        base_price: Set(a.base_price.clone()),
        royalty_fees: Set(a.royalty_fees.clone()),
        payment_method: Set(a.payment_method.clone()),
        block_number: Set(a.block_number as i64),
        created_at: Set(a.created_at as i64),
        closed_at: Set(a.closed_at.map(|t| t as i64)),
        expires_at: Set(a.expires_at.map(|t| t as i64)),
        bids: Set(ids_to_json(&a.bids)),
        bid_count: Set(a.bid_count as i64),
        sold_price: Set(a.sold_price.clone()),
        updated_at: Set(Utc::now().into()),
    }
}

fn bid_from_model(m: bids::Model) -> Result<Bid, StoreError> {
    Ok(Bid {
        id: m.id,
        auction: m.auction_id,
        nft: m.nft_id,
        nft_address: m.nft_address,
        seller: m.seller,
        bidder: m.bidder,
        bid_value: m.bid_value,
        status: BidStatus::from_str(&m.status).map_err(StoreError::Backend)?,
        block_number: m.block_number as u64,
        created_at: m.created_at as u64,
        closed_at: m.closed_at.map(|t| t as u64),
    })
}

fn bid_to_active(b: &Bid) -> bids::ActiveModel {
    bids::ActiveModel {
        id: Set(b.id.clone()),
        auction_id: Set(b.auction.clone()),
        nft_id: Set(b.nft.clone()),
        nft_address: Set(b.nft_address.clone()),
        seller: Set(b.seller.clone()),
        bidder: Set(b.bidder.clone()),
        bid_value: Set(b.bid_value.clone()),
        status: Set(b.status.as_str().to_string()),
        block_number: Set(b.block_number as i64),
        created_at: Set(b.created_at as i64),
        closed_at: Set(b.closed_at.map(|t| t as i64)),
        updated_at: Set(Utc::now().into()),
    }
}

fn user_from_model(m: users::Model) -> User {
    User {
        address: m.address,
        nfts: ids_from_json(&m.nfts),
        bids: ids_from_json(&m.bids),
        active_sell_orders: ids_from_json(&m.active_sell_orders),
    }
}

fn user_to_active(u: &User) -> users::ActiveModel {
    users::ActiveModel {
        address: Set(u.address.clone()),
        nfts: Set(ids_to_json(&u.nfts)),
        bids: Set(ids_to_json(&u.bids)),
        active_sell_orders: Set(ids_to_json(&u.active_sell_orders)),
        updated_at: Set(Utc::now().into()),
    }
}

fn method_from_model(m: payment_methods::Model) -> PaymentMethod {
    PaymentMethod {
        address: m.address,
        name: m.name,
        symbol: m.symbol,
        is_platform_token: m.is_platform_token,
    }
}

fn method_to_active(m: &PaymentMethod) -> payment_methods::ActiveModel {
    payment_methods::ActiveModel {
        address: Set(m.address.clone()),
        name: Set(m.name.clone()),
        symbol: Set(m.symbol.clone()),
        is_platform_token: Set(m.is_platform_token),
        updated_at: Set(Utc::now().into()),
    }
}

fn payment_from_model(m: payments::Model) -> Payment {
    Payment {
        auction_id: m.auction_id,
        total_value: m.total_value,
        owner_payment: m.owner_payment,
        royalty_cut: m.royalty_cut,
        platform_cut: m.platform_cut,
        referral_bonus: m.referral_bonus,
        cash_back: m.cash_back,
        owner_cash_back: m.owner_cash_back,
        total_cash_back: m.total_cash_back,
        payment_method: m.payment_method,
    }
}

fn payment_to_active(p: &Payment) -> payments::ActiveModel {
    payments::ActiveModel {
        auction_id: Set(p.auction_id.clone()),
        total_value: Set(p.total_value.clone()),
        owner_payment: Set(p.owner_payment.clone()),
        royalty_cut: Set(p.royalty_cut.clone()),
        platform_cut: Set(p.platform_cut.clone()),
        referral_bonus: Set(p.referral_bonus.clone()),
        cash_back: Set(p.cash_back.clone()),
        owner_cash_back: Set(p.owner_cash_back.clone()),
        total_cash_back: Set(p.total_cash_back.clone()),
        payment_method: Set(p.payment_method.clone()),
        updated_at: Set(Utc::now().into()),
    }
}

fn history_from_model(m: nft_token_histories::Model) -> NftTokenHistory {
    NftTokenHistory {
        nft_id: m.nft_id,
        token_address: m.token_address,
        token_id: m.token_id,
        payment_method: m.payment_method,
        timestamp: m.timestamp as u64,
        current_price: m.current_price,
        previous_owner: m.previous_owner,
        current_owner: m.current_owner,
        last_historical_price: m.last_historical_price,
    }
}

fn history_to_active(h: &NftTokenHistory) -> nft_token_histories::ActiveModel {
    nft_token_histories::ActiveModel {
        nft_id: Set(h.nft_id.clone()),
        token_address: Set(h.token_address.clone()),
        token_id: Set(h.token_id.clone()),
        payment_method: Set(h.payment_method.clone()),
        timestamp: Set(h.timestamp as i64),
        current_price: Set(h.current_price.clone()),
        previous_owner: Set(h.previous_owner.clone()),
        current_owner: Set(h.current_owner.clone()),
        last_historical_price: Set(h.last_historical_price.clone()),
        updated_at: Set(Utc::now().into()),
    }
}

#[async_trait]
impl EntityStore for SqlEntityStore {
    async fn get_or_create_nft(
        &self,
        contract_address: &str,
        token_id: &str,
    ) -> Result<(Nft, bool), StoreError> {
        let id = ids::nft_id(contract_address, token_id);
        if let Some(existing) = self.nft(&id).await? {
            return Ok((existing, false));
        }
        let nft = Nft::new(contract_address, token_id);
        Nfts::insert(nft_to_active(&nft))
            .exec(&self.conn)
            .await
            .map_err(db_err)?;
        Ok((nft, true))
    }

    async fn nft(&self, id: &str) -> Result<Option<Nft>, StoreError> {
        let model = Nfts::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(model.map(nft_from_model))
    }

    async fn save_nft(&self, nft: &Nft) -> Result<(), StoreError> {
        let exists = Nfts::find_by_id(nft.id.clone())
            .one(&self.conn)
            .await
            .map_err(db_err)?
            .is_some();
        let model = nft_to_active(nft);
        if exists {
            Nfts::update(model).exec(&self.conn).await.map_err(db_err)?;
        } else {
            Nfts::insert(model).exec(&self.conn).await.map_err(db_err)?;
        }
        Ok(())
    }

    async fn get_or_create_auction(&self, id: &str) -> Result<(Auction, bool), StoreError> {
        let id = ids::auction_id(id);
        if let Some(existing) = self.auction(&id).await? {
            return Ok((existing, false));
        }
        let auction = Auction::new(&id);
        Auctions::insert(auction_to_active(&auction))
            .exec(&self.conn)
            .await
            .map_err(db_err)?;
        Ok((auction, true))
    }

    async fn auction(&self, id: &str) -> Result<Option<Auction>, StoreError> {
        let model = Auctions::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        model.map(auction_from_model).transpose()
    }

    async fn save_auction(&self, auction: &Auction) -> Result<(), StoreError> {
        let exists = Auctions::find_by_id(auction.id.clone())
            .one(&self.conn)
            .await
            .map_err(db_err)?
            .is_some();
        let model = auction_to_active(auction);
        if exists {
            Auctions::update(model)
                .exec(&self.conn)
                .await
                .map_err(db_err)?;
        } else {
            Auctions::insert(model)
                .exec(&self.conn)
                .await
                .map_err(db_err)?;
        }
        Ok(())
    }

    async fn bid(&self, id: &str) -> Result<Option<Bid>, StoreError> {
        let model = Bids::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        model.map(bid_from_model).transpose()
    }

    async fn save_bid(&self, bid: &Bid) -> Result<(), StoreError> {
        let exists = Bids::find_by_id(bid.id.clone())
            .one(&self.conn)
            .await
            .map_err(db_err)?
            .is_some();
        let model = bid_to_active(bid);
        if exists {
            Bids::update(model).exec(&self.conn).await.map_err(db_err)?;
        } else {
            Bids::insert(model).exec(&self.conn).await.map_err(db_err)?;
        }
        Ok(())
    }

    async fn get_or_create_user(&self, address: &str) -> Result<(User, bool), StoreError> {
        let id = ids::user_id(address);
        let model = Users::find_by_id(id.clone())
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        if let Some(existing) = model {
            return Ok((user_from_model(existing), false));
        }
        let user = User::new(&id);
        Users::insert(user_to_active(&user))
            .exec(&self.conn)
            .await
            .map_err(db_err)?;
        Ok((user, true))
    }

    async fn user(&self, address: &str) -> Result<Option<User>, StoreError> {
        let model = Users::find_by_id(address.to_string())
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_from_model))
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let exists = Users::find_by_id(user.address.clone())
            .one(&self.conn)
            .await
            .map_err(db_err)?
            .is_some();
        let model = user_to_active(user);
        if exists {
            Users::update(model).exec(&self.conn).await.map_err(db_err)?;
        } else {
            Users::insert(model).exec(&self.conn).await.map_err(db_err)?;
        }
        Ok(())
    }

    async fn get_or_create_payment_method(
        &self,
        token_address: &str,
    ) -> Result<(PaymentMethod, bool), StoreError> {
        let id = ids::payment_method_id(token_address);
        let model = PaymentMethods::find_by_id(id.clone())
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        if let Some(existing) = model {
            return Ok((method_from_model(existing), false));
        }
        let method = PaymentMethod::new(&id);
        PaymentMethods::insert(method_to_active(&method))
            .exec(&self.conn)
            .await
            .map_err(db_err)?;
        Ok((method, true))
    }

    async fn payment_method(
        &self,
        token_address: &str,
    ) -> Result<Option<PaymentMethod>, StoreError> {
        let model = PaymentMethods::find_by_id(token_address.to_string())
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(model.map(method_from_model))
    }

    async fn save_payment_method(&self, method: &PaymentMethod) -> Result<(), StoreError> {
        let exists = PaymentMethods::find_by_id(method.address.clone())
            .one(&self.conn)
            .await
            .map_err(db_err)?
            .is_some();
        let model = method_to_active(method);
        if exists {
            PaymentMethods::update(model)
                .exec(&self.conn)
                .await
                .map_err(db_err)?;
        } else {
            PaymentMethods::insert(model)
                .exec(&self.conn)
                .await
                .map_err(db_err)?;
        }
        Ok(())
    }

    async fn get_or_create_payment(
        &self,
        auction_id: &str,
    ) -> Result<(Payment, bool), StoreError> {
        let id = ids::auction_id(auction_id);
        if let Some(existing) = self.payment(&id).await? {
            return Ok((existing, false));
        }
        let payment = Payment::new(&id);
        Payments::insert(payment_to_active(&payment))
            .exec(&self.conn)
            .await
            .map_err(db_err)?;
        Ok((payment, true))
    }

    async fn payment(&self, auction_id: &str) -> Result<Option<Payment>, StoreError> {
        let model = Payments::find_by_id(auction_id.to_string())
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(model.map(payment_from_model))
    }

    async fn save_payment(&self, payment: &Payment) -> Result<(), StoreError> {
        let exists = Payments::find_by_id(payment.auction_id.clone())
            .one(&self.conn)
            .await
            .map_err(db_err)?
            .is_some();
        let model = payment_to_active(payment);
        if exists {
            Payments::update(model)
                .exec(&self.conn)
                .await
                .map_err(db_err)?;
        } else {
            Payments::insert(model)
                .exec(&self.conn)
                .await
                .map_err(db_err)?;
        }
        Ok(())
    }

    async fn get_or_create_history(
        &self,
        nft_id: &str,
    ) -> Result<(NftTokenHistory, bool), StoreError> {
        if let Some(existing) = self.history(nft_id).await? {
            return Ok((existing, false));
        }
        let history = NftTokenHistory::new(nft_id);
        NftTokenHistories::insert(history_to_active(&history))
            .exec(&self.conn)
            .await
            .map_err(db_err)?;
        Ok((history, true))
    }

    async fn history(&self, nft_id: &str) -> Result<Option<NftTokenHistory>, StoreError> {
        let model = NftTokenHistories::find_by_id(nft_id.to_string())
            .one(&self.conn)
            .await
            .map_err(db_err)?;
        Ok(model.map(history_from_model))
    }

    async fn save_history(&self, history: &NftTokenHistory) -> Result<(), StoreError> {
        let exists = NftTokenHistories::find_by_id(history.nft_id.clone())
            .one(&self.conn)
            .await
            .map_err(db_err)?
            .is_some();
        let model = history_to_active(history);
        if exists {
            NftTokenHistories::update(model)
                .exec(&self.conn)
                .await
                .map_err(db_err)?;
        } else {
            NftTokenHistories::insert(model)
                .exec(&self.conn)
                .await
                .map_err(db_err)?;
        }
        Ok(())
    }
}
