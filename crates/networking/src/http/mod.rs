//! HTTP client implementations

mod client;

pub use client::ChainGatewayClient;
