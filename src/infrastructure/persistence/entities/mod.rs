pub mod auctions;
pub mod bids;
pub mod nft_token_histories;
pub mod nfts;
pub mod payment_methods;
pub mod payments;
pub mod users;

pub mod prelude {
    pub use super::auctions::Entity as Auctions;
    pub use super::bids::Entity as Bids;
    pub use super::nft_token_histories::Entity as NftTokenHistories;
    pub use super::nfts::Entity as Nfts;
    pub use super::payment_methods::Entity as PaymentMethods;
    pub use super::payments::Entity as Payments;
    pub use super::users::Entity as Users;
}
