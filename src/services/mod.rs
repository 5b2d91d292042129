// Service exports
pub mod gateway;
pub mod match_api;

pub use gateway::{DataGateway, GatewayError};
pub use match_api::{format_instant, MatchApiClient};
