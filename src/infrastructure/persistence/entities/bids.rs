//! Bid entity for SeaORM

use bigdecimal::BigDecimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bids")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub auction_id: String,
    pub nft_id: String,
    pub nft_address: String,
    pub seller: String,
    pub bidder: String,
    pub bid_value: BigDecimal,
    pub status: String,
    pub block_number: i64,
    pub created_at: i64,
    pub closed_at: Option<i64>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
