use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BirdeyeHistoryPrice {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<BirdeyeHistoryData>,
}

#[derive(Debug, Deserialize)]
pub struct BirdeyeHistoryData {
    #[serde(default)]
    pub items: Vec<BirdeyePriceItem>,
}

#[derive(Debug, Deserialize)]
pub struct BirdeyePriceItem {
    #[serde(rename = "unixTime")]
    pub unix_time: i64,
    pub value: f64,
}
