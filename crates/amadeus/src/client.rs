use std::time::{Duration, Instant};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;
use wayfarer_core::config::AmadeusConfig;
use wayfarer_core::domain::results::{
    CarOffer, CarQuery, FlightOffer, FlightQuery, HotelOffer, HotelQuery,
};
use wayfarer_core::provider::TravelProvider;

use crate::{cars, flights, hotels};

const TOKEN_PATH: &str = "/v1/security/oauth2/token";

// Refresh slightly before the reported expiry to avoid racing it.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum AmadeusError {
    #[error("amadeus credentials are not configured")]
    MissingCredentials,
    #[error("amadeus http client could not be built: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("amadeus request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("amadeus returned status {status}: {body}")]
    Status { status: u16, body: String },
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    1799
}

pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    client_id: SecretString,
    client_secret: SecretString,
    token: Mutex<Option<CachedToken>>,
}

impl AmadeusClient {
    pub fn from_config(config: &AmadeusConfig) -> Result<Self, AmadeusError> {
        let client_id = config.client_id.clone().ok_or(AmadeusError::MissingCredentials)?;
        let client_secret =
            config.client_secret.clone().ok_or(AmadeusError::MissingCredentials)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AmadeusError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
            token: Mutex::new(None),
        })
    }

    /// Client-credentials bearer token, cached until shortly before expiry.
    async fn bearer(&self) -> Result<String, AmadeusError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.access_token.clone());
            }
        }

        let response = self
            .http
            .post(format!("{}{}", self.base_url, TOKEN_PATH))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.expose_secret()),
                ("client_secret", self.client_secret.expose_secret()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AmadeusError::Status { status: status.as_u16(), body });
        }

        let token: TokenResponse = response.json().await?;
        let expires_at = Instant::now()
            + Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        debug!(expires_in = token.expires_in, "amadeus access token refreshed");

        let access_token = token.access_token.clone();
        *cached = Some(CachedToken { access_token: token.access_token, expires_at });
        Ok(access_token)
    }

    pub(crate) async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, AmadeusError> {
        let bearer = self.bearer().await?;
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(bearer)
            .query(query)
            .send()
            .await?;

        decode(response).await
    }

    pub(crate) async fn post_json(&self, path: &str, body: &Value) -> Result<Value, AmadeusError> {
        let bearer = self.bearer().await?;
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;

        decode(response).await
    }
}

async fn decode(response: reqwest::Response) -> Result<Value, AmadeusError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AmadeusError::Status { status: status.as_u16(), body });
    }
    Ok(response.json().await?)
}

#[async_trait]
impl TravelProvider for AmadeusClient {
    async fn search_flights(&self, query: &FlightQuery) -> Option<Vec<FlightOffer>> {
        flights::search(self, query).await
    }

    async fn search_hotels(&self, query: &HotelQuery) -> Option<Vec<HotelOffer>> {
        hotels::search(self, query).await
    }

    async fn search_car_rentals(&self, query: &CarQuery) -> Option<Vec<CarOffer>> {
        cars::search(self, query).await
    }
}
