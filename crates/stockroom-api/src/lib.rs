// stockroom-api: Async Rust client for the items REST API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ItemsClient;
pub use error::Error;
pub use transport::TransportConfig;
