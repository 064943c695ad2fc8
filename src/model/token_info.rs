use crate::types::CodexTokenInfo;

/// Token metadata with the empty/zero defaults already applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub total_supply: f64,
    pub circulating_supply: f64,
    pub image_url: String,
}

impl From<CodexTokenInfo> for TokenInfo {
    fn from(value: CodexTokenInfo) -> Self {
        TokenInfo {
            name: value.name.unwrap_or_default(),
            symbol: value.symbol.unwrap_or_default(),
            total_supply: value.total_supply.unwrap_or_default(),
            circulating_supply: value.circulating_supply.unwrap_or_default(),
            image_url: value.image_large_url.unwrap_or_default(),
        }
    }
}
