pub mod errors;
pub mod gateway;
pub mod ids;
pub mod models;
pub mod services;
pub mod store;
