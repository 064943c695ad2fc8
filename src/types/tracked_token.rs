use serde::Deserialize;

use crate::helpers::deserialize_optional_number;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedToken {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub total_supply: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub circulating_supply: Option<f64>,
}
