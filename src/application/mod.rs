pub mod event_source;
pub mod runner;

pub use runner::ProjectionRunner;
