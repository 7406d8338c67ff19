pub mod auction;
pub mod bid;
pub mod category;
pub mod event;
pub mod history;
pub mod nft;
pub mod payment;
pub mod payment_method;
pub mod user;

pub use auction::{Auction, AuctionStatus};
pub use bid::{Bid, BidStatus};
pub use category::Category;
pub use event::{EventEnvelope, MarketplaceEvent};
pub use history::NftTokenHistory;
pub use nft::Nft;
pub use payment::Payment;
pub use payment_method::PaymentMethod;
pub use user::User;
