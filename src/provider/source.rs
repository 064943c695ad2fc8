use async_trait::async_trait;

use crate::{
    error::Error,
    model::{PriceSeries, TokenInfo},
};

#[async_trait]
pub trait MetadataSource {
    async fn get_token_info(
        &self,
        address: &str,
        network_id: i64,
    ) -> Result<TokenInfo, Error>;
}

/// Implementations are responsible for their own rate limiting.
#[async_trait]
pub trait PriceSource {
    async fn get_price_history(
        &self,
        address: &str,
        chain: &str,
        time_from: i64,
        time_to: i64,
    ) -> Result<PriceSeries, Error>;
}
