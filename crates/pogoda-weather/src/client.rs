//! Client for the current-weather and forecast endpoints.
//!
//! Every call is a single attempt: non-2xx statuses, transport failures and
//! undecodable bodies are returned to the caller as [`WeatherError`]s.

use pogoda_core::WeatherConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::instrument;
use url::Url;

use crate::error::{Endpoint, WeatherError};
use crate::types::{CurrentWeather, ForecastBundle, LocationQuery};

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Arc<Client>,
    current_weather_url: Url,
    forecast_url: Url,
}

impl WeatherClient {
    pub fn new(
        current_weather_url: &str,
        forecast_url: &str,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WeatherError::Client)?;

        Ok(Self {
            client: Arc::new(client),
            current_weather_url: parse_endpoint(current_weather_url, Endpoint::CurrentWeather)?,
            forecast_url: parse_endpoint(forecast_url, Endpoint::Forecast)?,
        })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::new(
            &config.current_weather_url,
            &config.forecast_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Current conditions for a city or coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn get_current_weather(
        &self,
        location: &LocationQuery,
    ) -> Result<CurrentWeather, WeatherError> {
        self.fetch(Endpoint::CurrentWeather, location).await
    }

    /// Hourly forecast for a city or coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn get_forecast(
        &self,
        location: &LocationQuery,
    ) -> Result<ForecastBundle, WeatherError> {
        self.fetch(Endpoint::Forecast, location).await
    }

    /// Like [`get_current_weather`](Self::get_current_weather), abandoned once `token` fires.
    pub async fn get_current_weather_cancellable(
        &self,
        location: &LocationQuery,
        token: &CancellationToken,
    ) -> Result<CurrentWeather, WeatherError> {
        until_cancelled(
            Endpoint::CurrentWeather,
            token,
            self.get_current_weather(location),
        )
        .await
    }

    /// Like [`get_forecast`](Self::get_forecast), abandoned once `token` fires.
    pub async fn get_forecast_cancellable(
        &self,
        location: &LocationQuery,
        token: &CancellationToken,
    ) -> Result<ForecastBundle, WeatherError> {
        until_cancelled(Endpoint::Forecast, token, self.get_forecast(location)).await
    }

    /// Fetch current weather for several locations concurrently.
    ///
    /// Each location gets its own task and its own result; results come back
    /// in input order. Must be called from within a tokio runtime.
    #[instrument(skip_all, fields(count = locations.len()), level = "info")]
    pub async fn current_weather_for_locations(
        &self,
        locations: Vec<LocationQuery>,
        token: CancellationToken,
    ) -> Vec<(LocationQuery, Result<CurrentWeather, WeatherError>)> {
        let handles: Vec<_> = locations
            .into_iter()
            .map(|location| {
                let client = self.clone();
                let token = token.clone();
                let task_location = location.clone();
                let handle = tokio::spawn(async move {
                    client
                        .get_current_weather_cancellable(&task_location, &token)
                        .await
                });
                (location, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (location, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(WeatherError::Task(e)),
            };
            results.push((location, result));
        }
        results
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        location: &LocationQuery,
    ) -> Result<T, WeatherError> {
        location.validate()?;

        let url = self.request_url(endpoint, location);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|source| {
            tracing::debug!("{} request failed: {}", endpoint, source);
            WeatherError::Transport { endpoint, source }
        })?;

        handle_response(endpoint, response).await
    }

    fn request_url(&self, endpoint: Endpoint, location: &LocationQuery) -> Url {
        let mut url = match endpoint {
            Endpoint::CurrentWeather => self.current_weather_url.clone(),
            Endpoint::Forecast => self.forecast_url.clone(),
        };
        // Percent-encode values (space as %20), keeping any query the base URL carries
        let mut query: Vec<String> = url
            .query()
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .into_iter()
            .collect();
        for (key, value) in location.query_pairs() {
            query.push(format!("{}={}", key, urlencoding::encode(&value)));
        }
        url.set_query(Some(&query.join("&")));
        url
    }
}

fn parse_endpoint(raw: &str, endpoint: Endpoint) -> Result<Url, WeatherError> {
    let url = Url::parse(raw).map_err(|e| WeatherError::InvalidEndpoint {
        endpoint,
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(WeatherError::InvalidEndpoint {
            endpoint,
            reason: format!("unsupported URL: {raw}"),
        });
    }

    Ok(url)
}

async fn until_cancelled<T>(
    endpoint: Endpoint,
    token: &CancellationToken,
    request: impl Future<Output = Result<T, WeatherError>>,
) -> Result<T, WeatherError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            tracing::debug!("{} request cancelled", endpoint);
            Err(WeatherError::Cancelled { endpoint })
        }
        result = request => result,
    }
}

/// Map status and body to a typed result.
async fn handle_response<T: DeserializeOwned>(
    endpoint: Endpoint,
    response: reqwest::Response,
) -> Result<T, WeatherError> {
    let status = response.status();
    tracing::debug!("{} responded with {}", endpoint, status);

    if !status.is_success() {
        return Err(WeatherError::Request {
            endpoint,
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| WeatherError::Transport { endpoint, source })?;

    serde_json::from_slice(&body).map_err(|e| WeatherError::MalformedResponse {
        endpoint,
        reason: e.to_string(),
    })
}
