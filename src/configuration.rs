use std::{collections::HashMap, env, fmt, fs, io, path::Path, str::FromStr};

use chrono::NaiveDate;
use url::Url;

use crate::{
    error::Error,
    types::{ChainIds, TrackedToken},
};

pub const DEFAULT_CODEX_API_URL: &str = "https://graph.codex.io/graphql";
pub const DEFAULT_BIRDEYE_API_URL: &str =
    "https://public-api.birdeye.so/defi/history_price";
pub const DEFAULT_TRACKED_TOKENS_FILE: &str = "tracked_tokens.json";
pub const DEFAULT_CHAIN_IDS_FILE: &str = "codex_chain_ids.json";
pub const DEFAULT_OUTPUT_FILE: &str = "historical_data.csv";
pub const DEFAULT_START_DATE: &str = "2024-10-10";
pub const MIN_PRICE_CALL_DELAY_IN_MS: u64 = 1000;
pub const DEFAULT_TIMEOUT: u64 = 30;

/// What happens to a token whose metadata cannot be resolved or fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataFailurePolicy {
    /// Keep the row, with empty name/symbol/image and zero supplies.
    #[default]
    Degrade,
    /// Leave the token out of the report.
    Skip,
}

impl fmt::Display for MetadataFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MetadataFailurePolicy::Degrade => write!(f, "degrade"),
            MetadataFailurePolicy::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for MetadataFailurePolicy {
    type Err = Error;

    fn from_str(value: &str) -> Result<MetadataFailurePolicy, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "degrade" => Ok(MetadataFailurePolicy::Degrade),
            "skip" => Ok(MetadataFailurePolicy::Skip),
            other => Err(Error::ConfigurationError(format!(
                "METADATA_FAILURE_POLICY not supported: {}",
                other
            ))),
        }
    }
}

/// Which supply figure market cap is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupplySource {
    #[default]
    Total,
    /// Circulating supply, falling back to total supply when it is zero.
    Circulating,
}

impl fmt::Display for SupplySource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SupplySource::Total => write!(f, "total"),
            SupplySource::Circulating => write!(f, "circulating"),
        }
    }
}

impl FromStr for SupplySource {
    type Err = Error;

    fn from_str(value: &str) -> Result<SupplySource, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "total" => Ok(SupplySource::Total),
            "circulating" => Ok(SupplySource::Circulating),
            other => Err(Error::ConfigurationError(format!(
                "SUPPLY_SOURCE not supported: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub birdeye_api_key: String,
    pub codex_api_key: Option<String>,
    pub codex_api_url: Url,
    pub birdeye_api_url: Url,
    pub tracked_tokens_file: String,
    pub chain_ids_file: String,
    pub output_file: String,
    pub start_date: NaiveDate,
    pub price_call_delay_in_ms: u64,
    pub timeout: u64,
    pub metadata_failure_policy: MetadataFailurePolicy,
    pub supply_source: SupplySource,
}

impl Config {
    pub fn get_tracked_tokens(&self) -> Result<Vec<TrackedToken>, Error> {
        get_tracked_tokens(&self.tracked_tokens_file)
    }

    pub fn get_chain_ids(&self) -> Result<ChainIds, Error> {
        get_chain_ids(&self.chain_ids_file)
    }
}

pub fn get_configuration() -> Result<Config, Error> {
    build_configuration(|key| env::var(key).ok())
}

/// Builds the configuration from any key lookup; `get_configuration` feeds it
/// the process environment.
pub fn build_configuration<F>(lookup: F) -> Result<Config, Error>
where
    F: Fn(&str) -> Option<String>,
{
    let value = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };
    let or_default = |key: &str, default: &str| {
        value(key).unwrap_or_else(|| default.to_owned())
    };

    let birdeye_api_key = value("BIRDEYE_API_KEY")
        .ok_or(Error::MissingApiKey(String::from("BIRDEYE_API_KEY")))?;
    let codex_api_key = value("CODEX_API_KEY");

    let codex_api_url =
        Url::parse(&or_default("CODEX_API_URL", DEFAULT_CODEX_API_URL))?;
    let birdeye_api_url =
        Url::parse(&or_default("BIRDEYE_API_URL", DEFAULT_BIRDEYE_API_URL))?;

    let tracked_tokens_file =
        or_default("TRACKED_TOKENS_FILE", DEFAULT_TRACKED_TOKENS_FILE);
    let chain_ids_file = or_default("CHAIN_IDS_FILE", DEFAULT_CHAIN_IDS_FILE);
    let output_file = or_default("OUTPUT_FILE", DEFAULT_OUTPUT_FILE);

    let start_date = NaiveDate::parse_from_str(
        &or_default("START_DATE", DEFAULT_START_DATE),
        "%Y-%m-%d",
    )?;

    let price_call_delay_in_ms: u64 = match value("PRICE_CALL_DELAY_IN_MS") {
        Some(v) => v.parse()?,
        None => MIN_PRICE_CALL_DELAY_IN_MS,
    };

    if price_call_delay_in_ms < MIN_PRICE_CALL_DELAY_IN_MS {
        return Err(Error::ConfigurationError(format!(
            "PRICE_CALL_DELAY_IN_MS must be at least {}, got {}",
            MIN_PRICE_CALL_DELAY_IN_MS, price_call_delay_in_ms
        )));
    }

    let timeout: u64 = match value("TIMEOUT") {
        Some(v) => v.parse()?,
        None => DEFAULT_TIMEOUT,
    };

    let metadata_failure_policy = match value("METADATA_FAILURE_POLICY") {
        Some(v) => v.parse()?,
        None => MetadataFailurePolicy::default(),
    };

    let supply_source = match value("SUPPLY_SOURCE") {
        Some(v) => v.parse()?,
        None => SupplySource::default(),
    };

    let config = Config {
        birdeye_api_key,
        codex_api_key,
        codex_api_url,
        birdeye_api_url,
        tracked_tokens_file,
        chain_ids_file,
        output_file,
        start_date,
        price_call_delay_in_ms,
        timeout,
        metadata_failure_policy,
        supply_source,
    };

    Ok(config)
}

/// Loads `.env` (optional) and `etl.conf` from the crate directory into the
/// process environment. Variables already present in the environment win.
pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";
    let etl_config_file: &str = "etl.conf";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);
    let etl_config_path = format!("{}/{}", directory, etl_config_file);

    match fs::read_to_string(path) {
        Ok(config_string) => parse_config_string(&config_string),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {},
        Err(e) => return Err(Error::Io(e)),
    }

    let etl_config_string = fs::read_to_string(etl_config_path)?;
    parse_config_string(&etl_config_string);

    Ok(())
}

fn parse_config_string(config: &str) {
    for (key, value) in parse_config_lines(config) {
        if env::var_os(key).is_none() {
            env::set_var(key, value);
        }
    }
}

fn parse_config_lines(config: &str) -> Vec<(&str, &str)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim().trim_matches('"')))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

pub fn get_tracked_tokens<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<TrackedToken>, Error> {
    let data = fs::read_to_string(path)?;
    let tokens = serde_json::from_str::<Vec<TrackedToken>>(&data)?;
    Ok(tokens)
}

pub fn get_chain_ids<P: AsRef<Path>>(path: P) -> Result<ChainIds, Error> {
    let data = fs::read_to_string(path)?;
    let chain_ids = serde_json::from_str::<HashMap<String, i64>>(&data)?;
    Ok(ChainIds(chain_ids))
}
