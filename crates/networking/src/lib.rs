//! Constrix Networking - Chain gateway client

pub mod chain;
pub mod http;

pub use chain::{ChainError, ChainGateway, MilestoneRecord};
pub use http::ChainGatewayClient;
