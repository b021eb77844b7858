use crate::core::rates::{RateError, RateSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Latest USD rates from an exchangerate-api compatible endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> String {
        format!("{}/v4/latest/USD", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: BTreeMap<String, f64>,
}

#[async_trait]
impl RateSource for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<BTreeMap<String, f64>, RateError> {
        let url = self.url();
        debug!("Requesting exchange rates from {}", url);

        let fetch_error = |reason: String| RateError::Fetch {
            url: url.clone(),
            reason,
        };
        let parse_error = |reason: String| RateError::Parse {
            url: url.clone(),
            reason,
        };

        let client = reqwest::Client::builder()
            .user_agent("usdfx/1.0")
            .build()
            .map_err(|e| fetch_error(e.to_string()))?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_error(format!("Request error: {e}")))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP error: {}", response.status())));
        }

        let text = response
            .text()
            .await
            .map_err(|e| fetch_error(format!("Failed to read response body: {e}")))?;

        if text.trim().is_empty() {
            return Err(parse_error("Received empty response".to_string()));
        }

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| parse_error(format!("Failed to parse JSON response: {e}")))?;

        let total = data.rates.len();
        let rates: BTreeMap<String, f64> = data
            .rates
            .into_iter()
            .filter(|(code, rate)| {
                let usable = rate.is_finite() && *rate > 0.0;
                if !usable {
                    warn!(%code, %rate, "Dropping unusable exchange rate");
                }
                usable
            })
            .collect();

        if rates.is_empty() {
            return Err(parse_error("No usable rates in response".to_string()));
        }

        debug!("Received {} of {} rates", rates.len(), total);
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(mock_response: &str, status_code: u16) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "provider": "https://www.exchangerate-api.com",
            "base": "USD",
            "date": "2024-05-10",
            "time_last_updated": 1715299201,
            "rates": {
                "USD": 1,
                "EUR": 0.928,
                "JPY": 155.7,
                "INR": 83.5
            }
        }"#;
        let mock_server = create_mock_server(mock_response, 200).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let rates = provider.fetch_rates().await.unwrap();

        assert_eq!(rates.len(), 4);
        assert_eq!(rates.get("USD"), Some(&1.0));
        assert_eq!(rates.get("EUR"), Some(&0.928));
        assert_eq!(rates.get("JPY"), Some(&155.7));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_server = create_mock_server(r#"{"rates": {"EUR": 0.9}}"#, 200).await;

        let provider = ExchangeRateApiProvider::new(&format!("{}/", mock_server.uri()));
        assert_eq!(provider.url(), format!("{}/v4/latest/USD", mock_server.uri()));
        assert!(provider.fetch_rates().await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_rates_is_parse_error() {
        let mock_server = create_mock_server(r#"{"result": "error"}"#, 200).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates().await;

        match result {
            Err(RateError::Parse { reason, .. }) => {
                assert!(reason.contains("missing field `rates`"), "{reason}");
            }
            other => panic!("Expected a parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_numeric_rate_is_parse_error() {
        let mock_server = create_mock_server(r#"{"rates": {"EUR": "0.9"}}"#, 200).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates().await;
        assert!(matches!(result, Err(RateError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let mock_server = create_mock_server("<html>Service unavailable</html>", 200).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates().await;
        assert!(matches!(result, Err(RateError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_empty_response_is_parse_error() {
        let mock_server = create_mock_server("", 200).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates().await;

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            format!(
                "Unexpected exchange rate response from {}/v4/latest/USD: Received empty response",
                mock_server.uri()
            )
        );
    }

    #[tokio::test]
    async fn test_unusable_rates_are_dropped() {
        let mock_server =
            create_mock_server(r#"{"rates": {"EUR": 0.9, "BAD": 0, "NEG": -2.5}}"#, 200).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let rates = provider.fetch_rates().await.unwrap();
        assert_eq!(rates.keys().collect::<Vec<_>>(), vec!["EUR"]);
    }

    #[tokio::test]
    async fn test_no_usable_rates_is_parse_error() {
        let mock_server = create_mock_server(r#"{"rates": {}}"#, 200).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates().await;
        assert!(matches!(result, Err(RateError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_server_error_is_fetch_error() {
        let mock_server = create_mock_server("Server Error", 500).await;

        let provider = ExchangeRateApiProvider::new(&mock_server.uri());
        let result = provider.fetch_rates().await;

        match result {
            Err(RateError::Fetch { reason, .. }) => {
                assert_eq!(reason, "HTTP error: 500 Internal Server Error");
            }
            other => panic!("Expected a fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_fetch_error() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let provider = ExchangeRateApiProvider::new(&uri);
        let result = provider.fetch_rates().await;
        assert!(matches!(result, Err(RateError::Fetch { .. })));
    }
}
