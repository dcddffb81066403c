use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::PlacesError;

const AUTOCOMPLETE_URL: &str = "https://places.googleapis.com/v1/places:autocomplete";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Lookups are restricted to Australian addresses.
const REGION_CODES: &[&str] = &["au"];
const ADDRESS_TYPES: &[&str] = &["street_address", "premise", "subpremise"];

/// One address suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub formatted_address: String,
}

/// Something that turns partial input into address suggestions.
pub trait PlaceLookup: Send + Sync {
    fn autocomplete(&self, input: String) -> BoxFuture<'static, Result<Vec<Place>, PlacesError>>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AutocompleteRequest<'a> {
    input: &'a str,
    included_region_codes: &'a [&'a str],
    included_primary_types: &'a [&'a str],
}

#[derive(Debug, Default, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Suggestion {
    place_prediction: Option<PlacePrediction>,
}

#[derive(Debug, Deserialize)]
struct PlacePrediction {
    text: FormattableText,
}

#[derive(Debug, Deserialize)]
struct FormattableText {
    text: String,
}

impl AutocompleteResponse {
    fn into_places(self) -> Vec<Place> {
        self.suggestions
            .into_iter()
            .filter_map(|s| s.place_prediction)
            .map(|p| Place {
                formatted_address: p.text.text,
            })
            .collect()
    }
}

/// Client for the Google Places Autocomplete (New) API.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: reqwest::Client,
    api_key: String,
    url: String,
}

impl PlacesClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, PlacesError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            url: AUTOCOMPLETE_URL.to_string(),
        })
    }

    /// Points the client at a different autocomplete URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Fetches address suggestions for `input`.
    pub async fn suggest(&self, input: &str) -> Result<Vec<Place>, PlacesError> {
        let body = AutocompleteRequest {
            input,
            included_region_codes: REGION_CODES,
            included_primary_types: ADDRESS_TYPES,
        };
        let response = self
            .client
            .post(&self.url)
            .header("X-Goog-Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::Status(status.as_u16()));
        }
        let places = response.json::<AutocompleteResponse>().await?.into_places();
        debug!(count = places.len(), "address suggestions received");
        Ok(places)
    }

    /// Checks the service answers with this key.
    pub async fn probe(&self) -> Result<(), PlacesError> {
        self.suggest("Sydney").await.map(|_| ())
    }
}

impl PlaceLookup for PlacesClient {
    fn autocomplete(&self, input: String) -> BoxFuture<'static, Result<Vec<Place>, PlacesError>> {
        let client = self.clone();
        async move { client.suggest(&input).await }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_restricts_to_australian_addresses() {
        let body = AutocompleteRequest {
            input: "1 George",
            included_region_codes: REGION_CODES,
            included_primary_types: ADDRESS_TYPES,
        };
        insta::assert_snapshot!(serde_json::to_string(&body).unwrap(), @r#"{"input":"1 George","includedRegionCodes":["au"],"includedPrimaryTypes":["street_address","premise","subpremise"]}"#);
    }

    #[test]
    fn parses_place_predictions() {
        let json = r#"{
            "suggestions": [
                {"placePrediction": {
                    "place": "places/abc",
                    "placeId": "abc",
                    "text": {"text": "1 George Street, Sydney NSW, Australia", "matches": []}
                }},
                {"queryPrediction": {"text": {"text": "george street"}}},
                {"placePrediction": {
                    "placeId": "def",
                    "text": {"text": "1 George Street, Parramatta NSW, Australia"}
                }}
            ]
        }"#;
        let places = serde_json::from_str::<AutocompleteResponse>(json)
            .unwrap()
            .into_places();
        let addresses: Vec<_> = places.iter().map(|p| p.formatted_address.as_str()).collect();
        assert_eq!(
            addresses,
            vec![
                "1 George Street, Sydney NSW, Australia",
                "1 George Street, Parramatta NSW, Australia",
            ]
        );
    }

    #[test]
    fn empty_response_has_no_places() {
        let places = serde_json::from_str::<AutocompleteResponse>("{}")
            .unwrap()
            .into_places();
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn unreachable_service_is_http_error() {
        let client = PlacesClient::new("key")
            .unwrap()
            .with_url("http://127.0.0.1:9/v1/places:autocomplete");
        assert!(matches!(client.probe().await, Err(PlacesError::Http(_))));
    }
}
