//! NFT token history entity for SeaORM

use bigdecimal::BigDecimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nft_token_histories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub nft_id: String,
    pub token_address: String,
    pub token_id: String,
    pub payment_method: String,
    pub timestamp: i64,
    pub current_price: BigDecimal,
    pub previous_owner: Option<String>,
    pub current_owner: Option<String>,
    pub last_historical_price: Option<BigDecimal>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
