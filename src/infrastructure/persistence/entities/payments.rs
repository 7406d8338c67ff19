//! Payment entity for SeaORM

use bigdecimal::BigDecimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub auction_id: String,
    pub total_value: BigDecimal,
    pub owner_payment: BigDecimal,
    pub royalty_cut: BigDecimal,
    pub platform_cut: BigDecimal,
    pub referral_bonus: BigDecimal,
    pub cash_back: BigDecimal,
    pub owner_cash_back: BigDecimal,
    pub total_cash_back: BigDecimal,
    pub payment_method: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
