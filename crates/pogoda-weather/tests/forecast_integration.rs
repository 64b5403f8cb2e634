//! Integration tests for WeatherClient using wiremock.
//!
//! These tests drive the client against a mock HTTP server and feed the
//! fetched forecast through the daily aggregator.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use chrono::NaiveDate;
use pogoda_weather::{
    CompassPoint, DailyAggregator, Endpoint, LocationQuery, WeatherClient, WeatherError,
    WeatherIcon,
};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 2024-03-10T00:00:00Z
const MARCH_10: i64 = 1_710_028_800;
const HOUR: i64 = 3_600;

/// Helper to create a forecast item JSON
fn forecast_item(dt: i64, temp: f64, icon: &str, pop: f64) -> serde_json::Value {
    serde_json::json!({
        "dt": dt,
        "temp": temp,
        "feels_like": temp - 3.0,
        "temp_min": temp - 1.0,
        "temp_max": temp + 1.0,
        "pressure": 1012,
        "humidity": 64,
        "wind_speed": 5.4,
        "wind_deg": 200,
        "clouds": 75,
        "condition": "небольшой снег",
        "icon": icon,
        "pop": pop
    })
}

/// Helper to create a current weather JSON
fn current(city: &str, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "temp": temp,
        "feels_like": temp - 4.0,
        "temp_min": temp - 2.0,
        "temp_max": temp + 1.0,
        "pressure": 1018,
        "humidity": 40,
        "visibility": 1500,
        "wind_speed": 7.0,
        "wind_deg": 350,
        "clouds": 0,
        "condition": "ясно",
        "icon": "01n",
        "sunrise": 1710040000,
        "sunset": 1710080000,
        "city_name": city
    })
}

fn client_for(server: &MockServer) -> WeatherClient {
    WeatherClient::new(
        &format!("{}/weather", server.uri()),
        &format!("{}/forecast", server.uri()),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_forecast_by_coordinates_aggregates_into_days() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "56.8389"))
        .and(query_param("lon", "60.6057"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city_name": "Екатеринбург",
            "forecast": [
                forecast_item(MARCH_10, -2.0, "13d", 0.1),
                forecast_item(MARCH_10 + 3 * HOUR, 1.0, "04d", 0.65),
                forecast_item(MARCH_10 + 6 * HOUR, 3.0, "02d", 0.3),
                forecast_item(MARCH_10 + 24 * HOUR, -5.0, "13n", 0.9),
                forecast_item(MARCH_10 + 27 * HOUR, -7.0, "01n", 0.0),
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let bundle = client
        .get_forecast(&LocationQuery::coordinates(56.8389, 60.6057))
        .await
        .unwrap();

    assert_eq!(bundle.city_name, "Екатеринбург");
    assert_eq!(bundle.forecast.len(), 5);
    assert_eq!(bundle.forecast[0].wind_direction(), CompassPoint::South);

    let days = DailyAggregator::default().aggregate_bundle(&bundle);

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    assert_eq!(days[0].temperature_min, -2.0);
    assert_eq!(days[0].temperature_max, 3.0);
    assert_eq!(days[0].representative_condition_code, "04d");
    assert_eq!(days[0].icon(), WeatherIcon::Cloudy);
    assert_eq!(days[0].precipitation_probability_max, 65);

    assert_eq!(days[1].representative_condition_code, "01n");
    assert_eq!(days[1].precipitation_probability_max, 90);
}

#[tokio::test]
async fn test_forecast_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "API key not configured"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_forecast(&LocationQuery::city("Самара"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.endpoint(), Some(Endpoint::Forecast));
}

#[tokio::test]
async fn test_forecast_missing_list_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city_name": "Самара"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.get_forecast(&LocationQuery::city("Самара")).await;

    match result {
        Err(WeatherError::MalformedResponse { endpoint, reason }) => {
            assert_eq!(endpoint, Endpoint::Forecast);
            assert!(reason.contains("forecast"));
        }
        other => panic!("expected malformed response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_city_with_space_reaches_server_intact() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "Нижний Новгород"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current("Нижний Новгород", 2.0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let weather = client
        .get_current_weather(&LocationQuery::city("Нижний Новгород"))
        .await
        .unwrap();

    assert_eq!(weather.city_name, "Нижний Новгород");

    let requests = mock_server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert!(query.contains("%20"));
    assert!(!query.contains('+'));
}

#[tokio::test]
async fn test_empty_forecast_gives_no_days() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city_name": "Мурманск",
            "forecast": []
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let bundle = client
        .get_forecast(&LocationQuery::city("Мурманск"))
        .await
        .unwrap();

    assert!(DailyAggregator::default().aggregate_bundle(&bundle).is_empty());
}

#[tokio::test]
async fn test_current_weather_labels() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "Норильск"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current("Норильск", -31.0)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let weather = client
        .get_current_weather(&LocationQuery::city("Норильск"))
        .await
        .unwrap();

    assert_eq!(weather.icon(), WeatherIcon::Moon);
    assert_eq!(weather.wind_direction(), CompassPoint::North);
    assert_eq!(weather.visibility_quality().label(pogoda_core::Locale::Ru), "Плохая");
    assert_eq!(weather.humidity_comfort().label(pogoda_core::Locale::En), "comfortable");
}

#[tokio::test]
async fn test_concurrent_fetches_are_independent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "Казань"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current("Казань", 4.0)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "Атлантида"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "Сочи"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current("Сочи", 15.0)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let results = client
        .current_weather_for_locations(
            vec![
                LocationQuery::city("Казань"),
                LocationQuery::city("Атлантида"),
                LocationQuery::city("Сочи"),
            ],
            CancellationToken::new(),
        )
        .await;

    assert_eq!(results.len(), 3);

    assert_eq!(results[0].0, LocationQuery::city("Казань"));
    assert_eq!(results[0].1.as_ref().unwrap().temperature, 4.0);

    assert_eq!(results[1].0, LocationQuery::city("Атлантида"));
    let err = results[1].1.as_ref().unwrap_err();
    assert_eq!(err.status(), Some(404));

    assert_eq!(results[2].1.as_ref().unwrap().city_name, "Сочи");
}

#[tokio::test]
async fn test_cancelled_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current("Омск", -10.0))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let token = CancellationToken::new();
    token.cancel();

    let results = client
        .current_weather_for_locations(
            vec![LocationQuery::city("Омск"), LocationQuery::city("Томск")],
            token,
        )
        .await;

    assert_eq!(results.len(), 2);
    for (_, result) in &results {
        assert!(matches!(
            result,
            Err(WeatherError::Cancelled {
                endpoint: Endpoint::CurrentWeather
            })
        ));
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = WeatherClient::new(
        "http://127.0.0.1:9/weather",
        "http://127.0.0.1:9/forecast",
        Duration::from_secs(2),
    )
    .unwrap();

    let result = client.get_current_weather(&LocationQuery::city("Псков")).await;

    assert!(matches!(
        result,
        Err(WeatherError::Transport {
            endpoint: Endpoint::CurrentWeather,
            ..
        })
    ));
}
