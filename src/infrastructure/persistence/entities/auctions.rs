//! Auction entity for SeaORM

use bigdecimal::BigDecimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "auctions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub nft_id: String,
    pub nft_address: String,
    pub tx_hash: String,
    pub owner: String,
    pub buyer: Option<String>,
    pub status: String,
    pub category: Option<String>,
    pub base_price: BigDecimal,
    pub royalty_fees: BigDecimal,
    pub payment_method: String,
    pub block_number: i64,
    pub created_at: i64,
    pub closed_at: Option<i64>,
    pub expires_at: Option<i64>,
    pub bids: Json,
    pub bid_count: i64,
    pub sold_price: Option<BigDecimal>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
