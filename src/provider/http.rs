use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, TimeZone};
use reqwest::{
    header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, RequestBuilder, Response,
};
use serde_json::json;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    configuration::Config,
    error::Error,
    model::{PriceSeries, TokenInfo},
    provider::{MetadataSource, PriceSource},
    types::{BirdeyeHistoryPrice, CodexTokenInfoBody},
};

const TOKEN_INFO_QUERY: &str = r#"
    query GetTokenInfo($address: String!, $networkId: Int!) {
      getTokenInfo(address: $address, networkId: $networkId) {
        name
        symbol
        totalSupply
        circulatingSupply
        imageLargeUrl
      }
    }
"#;

#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
    pub http: Client,
}

impl HTTP {
    pub fn new(config: Config) -> Result<HTTP, Error> {
        let http = match Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                return Err(Error::ReqwestError(e));
            },
        };

        Ok(HTTP { config, http })
    }

    pub fn token_info_request(
        &self,
        address: &str,
        network_id: i64,
    ) -> Result<RequestBuilder, Error> {
        let api_key = self
            .config
            .codex_api_key
            .as_deref()
            .ok_or_else(|| {
                Error::MissingApiKey(String::from("CODEX_API_KEY"))
            })?;

        let body = json!({
            "query": TOKEN_INFO_QUERY,
            "variables": {
                "address": address,
                "networkId": network_id,
            },
        });

        let request = self
            .http
            .post(self.config.codex_api_url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(AUTHORIZATION, HeaderValue::from_str(api_key)?)
            .json(&body);

        Ok(request)
    }

    pub async fn get_codex_token_info(
        &self,
        address: &str,
        network_id: i64,
    ) -> Result<TokenInfo, Error> {
        let response = self
            .token_info_request(address, network_id)?
            .send()
            .await?;

        let json = check_status(response)?
            .json::<CodexTokenInfoBody>()
            .await?;

        parse_codex_token_info(json)
    }

    pub fn price_request(
        &self,
        address: &str,
        chain: &str,
        time_from: i64,
        time_to: i64,
    ) -> Result<RequestBuilder, Error> {
        let request = self
            .http
            .get(self.config.birdeye_api_url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header("x-chain", HeaderValue::from_str(chain)?)
            .header(
                "X-API-KEY",
                HeaderValue::from_str(&self.config.birdeye_api_key)?,
            )
            .query(&[
                ("address", address.to_owned()),
                ("address_type", String::from("token")),
                ("type", String::from("1D")),
                ("time_from", time_from.to_string()),
                ("time_to", time_to.to_string()),
            ]);

        Ok(request)
    }

    pub async fn get_birdeye_price_history(
        &self,
        address: &str,
        chain: &str,
        time_from: i64,
        time_to: i64,
    ) -> Result<PriceSeries, Error> {
        let response = self
            .price_request(address, chain, time_from, time_to)?
            .send()
            .await?;

        let json = check_status(response)?
            .json::<BirdeyeHistoryPrice>()
            .await?;

        if !json.success {
            warn!(
                "{} ({}): price api reported an unsuccessful response",
                address, chain
            );
        }

        let series = parse_birdeye_price_history(json, &Local);
        info!(
            "{} ({}): retrieved {} price entries",
            address,
            chain,
            series.len()
        );

        Ok(series)
    }
}

#[async_trait]
impl MetadataSource for HTTP {
    async fn get_token_info(
        &self,
        address: &str,
        network_id: i64,
    ) -> Result<TokenInfo, Error> {
        self.get_codex_token_info(address, network_id).await
    }
}

#[async_trait]
impl PriceSource for HTTP {
    async fn get_price_history(
        &self,
        address: &str,
        chain: &str,
        time_from: i64,
        time_to: i64,
    ) -> Result<PriceSeries, Error> {
        let result = self
            .get_birdeye_price_history(address, chain, time_from, time_to)
            .await;

        sleep(Duration::from_millis(self.config.price_call_delay_in_ms)).await;

        result
    }
}

fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(response)
}

pub fn parse_codex_token_info(
    body: CodexTokenInfoBody,
) -> Result<TokenInfo, Error> {
    if let Some(errors) = body.errors {
        if !errors.is_empty() {
            let messages = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<String>>()
                .join("; ");
            return Err(Error::GraphQL(messages));
        }
    }

    let info = body
        .data
        .and_then(|data| data.get_token_info)
        .ok_or(Error::FieldNotExist(String::from("getTokenInfo")))?;

    Ok(TokenInfo::from(info))
}

/// A response flagged unsuccessful carries no usable prices and maps to an
/// empty series.
pub fn parse_birdeye_price_history<Tz: TimeZone>(
    body: BirdeyeHistoryPrice,
    tz: &Tz,
) -> PriceSeries {
    if !body.success {
        return PriceSeries::new();
    }

    match body.data {
        Some(data) => PriceSeries::from_items(&data.items, tz),
        None => PriceSeries::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, time::Instant};

    use chrono::{NaiveDate, Utc};
    use serde_json::Value;

    use crate::configuration::build_configuration;

    fn http(overrides: &[(&str, &str)]) -> HTTP {
        let mut values = HashMap::from([
            (String::from("BIRDEYE_API_KEY"), String::from("birdeye-key")),
            (String::from("CODEX_API_KEY"), String::from("codex-key")),
        ]);
        for (key, value) in overrides {
            values.insert(key.to_string(), value.to_string());
        }

        let config = build_configuration(|key| values.get(key).cloned())
            .unwrap();
        HTTP::new(config).unwrap()
    }

    fn codex(json: &str) -> CodexTokenInfoBody {
        serde_json::from_str(json).unwrap()
    }

    fn birdeye(json: &str) -> BirdeyeHistoryPrice {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_codex_token_info() {
        let body = codex(
            r#"{
                "data": {
                    "getTokenInfo": {
                        "name": "Brett",
                        "symbol": "BRETT",
                        "totalSupply": "9999998988",
                        "circulatingSupply": "9911036515.5",
                        "imageLargeUrl": "https://img.example/brett.png"
                    }
                }
            }"#,
        );

        let info = parse_codex_token_info(body).unwrap();
        assert_eq!(info.name, "Brett");
        assert_eq!(info.symbol, "BRETT");
        assert_eq!(info.total_supply, 9_999_998_988.0);
        assert_eq!(info.circulating_supply, 9_911_036_515.5);
        assert_eq!(info.image_url, "https://img.example/brett.png");
    }

    #[test]
    fn test_parse_codex_missing_fields_default() {
        let body = codex(
            r#"{"data": {"getTokenInfo": {"name": null, "symbol": "X"}}}"#,
        );

        let info = parse_codex_token_info(body).unwrap();
        assert_eq!(
            info,
            TokenInfo {
                symbol: String::from("X"),
                ..TokenInfo::default()
            }
        );
    }

    #[test]
    fn test_parse_codex_errors() {
        let body = codex(
            r#"{"data": null, "errors": [
                {"message": "token not found"},
                {"message": "bad network"}
            ]}"#,
        );
        match parse_codex_token_info(body) {
            Err(Error::GraphQL(msg)) => {
                assert_eq!(msg, "token not found; bad network")
            },
            other => panic!("unexpected result: {:?}", other),
        }

        let body = codex(r#"{"data": {"getTokenInfo": null}}"#);
        assert!(matches!(
            parse_codex_token_info(body),
            Err(Error::FieldNotExist(_))
        ));
    }

    #[test]
    fn test_parse_birdeye_price_history() {
        let body = birdeye(
            r#"{
                "success": true,
                "data": {
                    "items": [
                        {"unixTime": 1728518400, "value": 0.12, "address": "x"},
                        {"unixTime": 1728604800, "value": 0.15},
                        {"unixTime": 1728610000, "value": 0.16}
                    ]
                }
            }"#,
        );

        let series = parse_birdeye_price_history(body, &Utc);
        assert_eq!(series.len(), 2);
        assert_eq!(
            series.get(&NaiveDate::from_ymd_opt(2024, 10, 10).unwrap()),
            Some(0.12)
        );
        assert_eq!(
            series.get(&NaiveDate::from_ymd_opt(2024, 10, 11).unwrap()),
            Some(0.16)
        );
    }

    #[test]
    fn test_parse_birdeye_unsuccessful_or_empty() {
        let body = birdeye(r#"{"success": false, "message": "Unauthorized"}"#);
        assert!(parse_birdeye_price_history(body, &Utc).is_empty());

        let body = birdeye(r#"{"success": true, "data": {"items": []}}"#);
        assert!(parse_birdeye_price_history(body, &Utc).is_empty());
    }

    #[test]
    fn test_parse_birdeye_rejects_malformed_items() {
        let result = serde_json::from_str::<BirdeyeHistoryPrice>(
            r#"{"success": true, "data": {"items": [{"unixTime": "soon"}]}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_price_request_shape() {
        let request = http(&[])
            .price_request("So1111", "solana", 1_728_518_400, 1_760_000_000)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().host_str(), Some("public-api.birdeye.so"));
        assert_eq!(request.url().path(), "/defi/history_price");

        let query: HashMap<String, String> =
            request.url().query_pairs().into_owned().collect();
        assert_eq!(query["address"], "So1111");
        assert_eq!(query["address_type"], "token");
        assert_eq!(query["type"], "1D");
        assert_eq!(query["time_from"], "1728518400");
        assert_eq!(query["time_to"], "1760000000");

        let headers = request.headers();
        assert_eq!(headers["x-chain"], "solana");
        assert_eq!(headers["x-api-key"], "birdeye-key");
        assert_eq!(headers[ACCEPT], "application/json");
    }

    #[test]
    fn test_token_info_request_shape() {
        let request = http(&[])
            .token_info_request("0xabc", 8453)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "https://graph.codex.io/graphql");
        assert_eq!(request.headers()[AUTHORIZATION], "codex-key");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");

        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        let body: Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(body["variables"]["address"], "0xabc");
        assert_eq!(body["variables"]["networkId"], 8453);
        let query = body["query"].as_str().unwrap();
        assert!(query.contains("getTokenInfo("));
        assert!(query.contains("address: $address, networkId: $networkId"));
    }

    #[test]
    fn test_token_info_request_without_key() {
        let mut client = http(&[]);
        client.config.codex_api_key = None;

        assert!(matches!(
            client.token_info_request("0xabc", 8453),
            Err(Error::MissingApiKey(_))
        ));
    }

    #[tokio::test]
    async fn test_price_call_pauses_after_failure() {
        let client = http(&[
            ("BIRDEYE_API_URL", "http://127.0.0.1:1/"),
            ("PRICE_CALL_DELAY_IN_MS", "1000"),
        ]);

        let started = Instant::now();
        let result = client
            .get_price_history("So1111", "solana", 0, 1)
            .await;

        assert!(result.is_err());
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
