pub mod abi;
pub mod client;

pub use client::EthGateway;
