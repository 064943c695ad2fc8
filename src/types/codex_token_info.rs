use serde::Deserialize;

use crate::helpers::deserialize_optional_number;

#[derive(Debug, Deserialize)]
pub struct CodexTokenInfoBody {
    #[serde(default)]
    pub data: Option<CodexTokenInfoData>,
    #[serde(default)]
    pub errors: Option<Vec<CodexError>>,
}

#[derive(Debug, Deserialize)]
pub struct CodexTokenInfoData {
    #[serde(rename = "getTokenInfo", default)]
    pub get_token_info: Option<CodexTokenInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexTokenInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub total_supply: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub image_large_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CodexError {
    pub message: String,
}
