//! HTTP geocoder adapter.
//!
//! Resolves ZIP codes through a Zippopotam-format endpoint and free-text
//! locators through a Nominatim-format place search. One attempt per
//! call — the engine's contract is a single blocking call per search, so
//! retry policy would belong here if a provider ever needed it.

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode};

use haulfinder_engine::{GeocodeError, Geocoder, Locator, SearchCenter};

use crate::types::{PlaceSearchResult, ZipLookupResponse};

/// Geocoder backed by two HTTP providers sharing one `reqwest` client.
pub struct HttpGeocoder {
    client: Client,
    zip_base_url: String,
    place_base_url: String,
}

impl HttpGeocoder {
    /// Creates an `HttpGeocoder` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Provider`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g. invalid TLS config).
    pub fn new(
        zip_base_url: &str,
        place_base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(|e| GeocodeError::Provider(e.into()))?;
        Ok(Self {
            client,
            zip_base_url: zip_base_url.trim_end_matches('/').to_string(),
            place_base_url: place_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn zip_url(&self, zip: &str) -> String {
        format!("{}/us/{}", self.zip_base_url, zip.trim())
    }

    fn place_url(&self, text: &str) -> String {
        let q = utf8_percent_encode(text, NON_ALPHANUMERIC);
        format!("{}/search?format=json&limit=1&q={q}", self.place_base_url)
    }

    async fn resolve_zip(&self, zip: &str) -> Result<SearchCenter, GeocodeError> {
        let url = self.zip_url(zip);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeocodeError::Provider(e.into()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GeocodeError::Unresolved {
                locator: format!("zip:{}", zip.trim()),
            });
        }
        if !response.status().is_success() {
            return Err(GeocodeError::Provider(anyhow!(
                "unexpected HTTP status {} from {url}",
                response.status()
            )));
        }

        let body: ZipLookupResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Provider(anyhow!("invalid ZIP lookup payload: {e}")))?;
        let place = body.places.first().ok_or_else(|| GeocodeError::Unresolved {
            locator: format!("zip:{}", zip.trim()),
        })?;

        Ok(SearchCenter {
            latitude: parse_coordinate(&place.latitude, "latitude")?,
            longitude: parse_coordinate(&place.longitude, "longitude")?,
            address: format!(
                "{}, {} {}",
                place.place_name, place.state_abbreviation, body.post_code
            ),
        })
    }

    async fn resolve_free_text(&self, text: &str) -> Result<SearchCenter, GeocodeError> {
        let url = self.place_url(text);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeocodeError::Provider(e.into()))?;

        if !response.status().is_success() {
            return Err(GeocodeError::Provider(anyhow!(
                "unexpected HTTP status {} from {url}",
                response.status()
            )));
        }

        let results: Vec<PlaceSearchResult> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Provider(anyhow!("invalid place search payload: {e}")))?;
        let Some(hit) = results.into_iter().next() else {
            return Err(GeocodeError::Unresolved {
                locator: text.to_string(),
            });
        };

        Ok(SearchCenter {
            latitude: parse_coordinate(&hit.lat, "latitude")?,
            longitude: parse_coordinate(&hit.lon, "longitude")?,
            address: hit.display_name,
        })
    }
}

fn parse_coordinate(raw: &str, axis: &str) -> Result<f64, GeocodeError> {
    raw.parse::<f64>()
        .map_err(|_| GeocodeError::Provider(anyhow!("non-numeric {axis} in provider payload: {raw:?}")))
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn resolve(&self, locator: &Locator) -> Result<SearchCenter, GeocodeError> {
        let center = match locator {
            Locator::Zip(zip) => self.resolve_zip(zip).await?,
            Locator::FreeText(text) => self.resolve_free_text(text).await?,
        };
        tracing::debug!(
            %locator,
            latitude = center.latitude,
            longitude = center.longitude,
            "resolved search center"
        );
        Ok(center)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn geocoder(server: &MockServer) -> HttpGeocoder {
        HttpGeocoder::new(&server.uri(), &server.uri(), 5, "haulfinder-test/0.1")
            .expect("build geocoder")
    }

    #[test]
    fn zip_url_trims_whitespace_and_trailing_slash() {
        let g = HttpGeocoder::new("http://zip.example/", "http://place.example", 5, "ua")
            .expect("geocoder");
        assert_eq!(g.zip_url(" 44101 "), "http://zip.example/us/44101");
    }

    #[test]
    fn place_url_percent_encodes_the_query() {
        let g = HttpGeocoder::new("http://zip.example", "http://place.example", 5, "ua")
            .expect("geocoder");
        assert_eq!(
            g.place_url("Cleveland, OH"),
            "http://place.example/search?format=json&limit=1&q=Cleveland%2C%20OH"
        );
    }

    #[tokio::test]
    async fn resolves_known_zip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/us/44101"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "post code": "44101",
                "places": [{
                    "place name": "Cleveland",
                    "state abbreviation": "OH",
                    "latitude": "41.4993",
                    "longitude": "-81.6944"
                }]
            })))
            .mount(&server)
            .await;

        let center = geocoder(&server)
            .resolve(&Locator::Zip("44101".to_string()))
            .await
            .expect("resolve");
        assert!((center.latitude - 41.4993).abs() < 1e-9);
        assert!((center.longitude + 81.6944).abs() < 1e-9);
        assert_eq!(center.address, "Cleveland, OH 44101");
    }

    #[tokio::test]
    async fn unknown_zip_is_unresolved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/us/00000"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = geocoder(&server)
            .resolve(&Locator::Zip("00000".to_string()))
            .await
            .unwrap_err();
        assert!(
            matches!(err, GeocodeError::Unresolved { ref locator } if locator == "zip:00000"),
            "expected Unresolved, got: {err:?}"
        );
    }

    #[tokio::test]
    async fn provider_outage_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/us/44101"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = geocoder(&server)
            .resolve(&Locator::Zip("44101".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, GeocodeError::Provider(_)));
    }

    #[tokio::test]
    async fn malformed_zip_payload_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/us/44101"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = geocoder(&server)
            .resolve(&Locator::Zip("44101".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, GeocodeError::Provider(_)));
    }

    #[tokio::test]
    async fn zip_with_no_places_is_unresolved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/us/99999"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "post code": "99999",
                "places": []
            })))
            .mount(&server)
            .await;

        let err = geocoder(&server)
            .resolve(&Locator::Zip("99999".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, GeocodeError::Unresolved { .. }));
    }

    #[tokio::test]
    async fn resolves_free_text_place() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Cleveland, OH"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "lat": "41.4993",
                "lon": "-81.6944",
                "display_name": "Cleveland, Cuyahoga County, Ohio"
            }])))
            .mount(&server)
            .await;

        let center = geocoder(&server)
            .resolve(&Locator::FreeText("Cleveland, OH".to_string()))
            .await
            .expect("resolve");
        assert_eq!(center.address, "Cleveland, Cuyahoga County, Ohio");
    }

    #[tokio::test]
    async fn empty_place_search_is_unresolved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = geocoder(&server)
            .resolve(&Locator::FreeText("nowhere in particular".to_string()))
            .await
            .unwrap_err();
        assert!(
            matches!(err, GeocodeError::Unresolved { ref locator } if locator == "nowhere in particular"),
            "expected Unresolved, got: {err:?}"
        );
    }

    #[tokio::test]
    async fn non_numeric_coordinates_are_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/us/44101"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "post code": "44101",
                "places": [{
                    "place name": "Cleveland",
                    "state abbreviation": "OH",
                    "latitude": "north-ish",
                    "longitude": "-81.6944"
                }]
            })))
            .mount(&server)
            .await;

        let err = geocoder(&server)
            .resolve(&Locator::Zip("44101".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, GeocodeError::Provider(_)));
    }
}
