use tracing::{error, info, warn};

use crate::{
    configuration::{Config, MetadataFailurePolicy, SupplySource},
    helpers::market_cap_in_millions,
    model::{DateAxis, PriceSeries, Report, ReportRow, ReportSummary, TokenInfo},
    provider::{MetadataSource, PriceSource},
    types::{ChainIds, TrackedToken},
};

pub struct MarketCapReport<'a, M, P> {
    metadata: &'a M,
    prices: &'a P,
    metadata_failure_policy: MetadataFailurePolicy,
    supply_source: SupplySource,
}

impl<'a, M, P> MarketCapReport<'a, M, P>
where
    M: MetadataSource + Sync,
    P: PriceSource + Sync,
{
    pub fn new(
        metadata: &'a M,
        prices: &'a P,
        metadata_failure_policy: MetadataFailurePolicy,
        supply_source: SupplySource,
    ) -> Self {
        MarketCapReport {
            metadata,
            prices,
            metadata_failure_policy,
            supply_source,
        }
    }

    pub fn from_config(
        metadata: &'a M,
        prices: &'a P,
        config: &Config,
    ) -> Self {
        Self::new(
            metadata,
            prices,
            config.metadata_failure_policy,
            config.supply_source,
        )
    }

    /// Processes tokens in list order. A failure on one token never stops the
    /// others.
    pub async fn build(
        &self,
        tokens: &[TrackedToken],
        chain_ids: &ChainIds,
        axis: &DateAxis,
    ) -> Report {
        let mut rows = Vec::with_capacity(tokens.len());
        let mut summary = ReportSummary {
            tokens: tokens.len(),
            ..ReportSummary::default()
        };

        for token in tokens {
            let info = match self.token_info(token, chain_ids).await {
                Some(info) => info,
                None => match self.metadata_failure_policy {
                    MetadataFailurePolicy::Degrade => {
                        summary.without_metadata += 1;
                        TokenInfo::default()
                    },
                    MetadataFailurePolicy::Skip => {
                        warn!(
                            "{} ({}): skipping token without metadata",
                            token.address, token.chain
                        );
                        summary.skipped += 1;
                        continue;
                    },
                },
            };

            let prices = self.price_series(token, axis).await;
            if prices.is_empty() {
                summary.without_prices += 1;
            }

            rows.push(self.row(token, info, &prices, axis));
        }

        info!(
            "Report built: {} rows, {} skipped, {} without metadata, \
             {} without prices",
            rows.len(),
            summary.skipped,
            summary.without_metadata,
            summary.without_prices
        );

        Report {
            axis: axis.clone(),
            rows,
            summary,
        }
    }

    async fn token_info(
        &self,
        token: &TrackedToken,
        chain_ids: &ChainIds,
    ) -> Option<TokenInfo> {
        let network_id = match chain_ids.resolve(&token.chain) {
            Some(id) => id,
            None => {
                warn!(
                    "{} ({}): no network id for chain",
                    token.address, token.chain
                );
                return None;
            },
        };

        match self.metadata.get_token_info(&token.address, network_id).await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(
                    "{} ({}): metadata fetch failed: {}",
                    token.address, token.chain, e
                );
                None
            },
        }
    }

    async fn price_series(
        &self,
        token: &TrackedToken,
        axis: &DateAxis,
    ) -> PriceSeries {
        match self
            .prices
            .get_price_history(
                &token.address,
                &token.chain,
                axis.time_from,
                axis.time_to,
            )
            .await
        {
            Ok(series) => series,
            Err(e) => {
                error!(
                    "{} ({}): price fetch failed: {}",
                    token.address, token.chain, e
                );
                PriceSeries::new()
            },
        }
    }

    fn row(
        &self,
        token: &TrackedToken,
        info: TokenInfo,
        prices: &PriceSeries,
        axis: &DateAxis,
    ) -> ReportRow {
        let total_supply = token.total_supply.unwrap_or(info.total_supply);
        let circulating_supply =
            token.circulating_supply.unwrap_or(info.circulating_supply);

        let supply = match self.supply_source {
            SupplySource::Total => total_supply,
            SupplySource::Circulating if circulating_supply > 0.0 => {
                circulating_supply
            },
            SupplySource::Circulating => total_supply,
        };

        let market_caps = axis
            .days
            .iter()
            .map(|day| match prices.get(day) {
                Some(price) if price != 0.0 => {
                    Some(market_cap_in_millions(price, supply))
                },
                _ => None,
            })
            .collect();

        let symbol = match (info.symbol.is_empty(), &token.ticker) {
            (true, Some(ticker)) => ticker.to_owned(),
            _ => info.symbol,
        };

        ReportRow {
            address: token.address.to_owned(),
            chain: token.chain.to_owned(),
            name: info.name,
            symbol,
            total_supply,
            circulating_supply,
            image: info.image_url,
            market_caps,
        }
    }
}
