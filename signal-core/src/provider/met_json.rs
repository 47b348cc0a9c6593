//! met.no locationforecast 2.0 adapter.
//!
//! Each timeseries entry carries instantaneous details plus up to three
//! look-ahead horizons (`next_1_hours`, `next_6_hours`, `next_12_hours`).
//! The symbolic condition and precipitation come from the first horizon
//! present, in that order; temperature, pressure and wind come from the
//! instant block.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::debug;

use crate::error::Error;
use crate::model::Period;
use crate::provider::truncate_body;

use super::ForecastProvider;

// met.no rejects requests without an identifying agent.
const HTTP_USER_AGENT: &str = concat!("weather-signal/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default)]
pub struct JsonProvider {
    http: Client,
}

impl JsonProvider {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl ForecastProvider for JsonProvider {
    async fn fetch_forecast(&self, url: &str) -> Result<Vec<Period>, Error> {
        debug!(url, "requesting locationforecast");

        let res = self.http.get(url).header(USER_AGENT, HTTP_USER_AGENT).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::Status { status, body: truncate_body(&body) });
        }

        parse_forecast(&body)
    }
}

/// Parse a locationforecast body into chronological periods.
pub fn parse_forecast(body: &str) -> Result<Vec<Period>, Error> {
    let parsed: LocationForecast = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("invalid forecast JSON: {e}")))?;

    parsed.properties.timeseries.iter().map(revive).collect()
}

/// Normalize one raw timeseries entry into a canonical period.
fn revive(entry: &TimeseriesEntry) -> Result<Period, Error> {
    let data = &entry.data;

    // Fallback chain: shortest horizon wins when several are present.
    let horizons = [
        (data.next_1_hours.as_ref(), 1),
        (data.next_6_hours.as_ref(), 6),
        (data.next_12_hours.as_ref(), 12),
    ];
    let (horizon, hours) = horizons
        .into_iter()
        .find_map(|(h, n)| h.map(|h| (h, n)))
        .ok_or_else(|| {
            Error::Parse(format!("timeseries entry at {} has no forecast horizon", entry.time))
        })?;

    let details = &data.instant.details;

    Ok(Period {
        from: entry.time,
        to: Some(entry.time + chrono::Duration::hours(hours)),
        number: 0,
        symbol: horizon.summary.symbol_code.clone(),
        precipitation: horizon
            .details
            .as_ref()
            .and_then(|d| d.precipitation_amount)
            .unwrap_or(0.0),
        wind_direction: details.wind_from_direction.unwrap_or(0.0),
        wind_speed: details.wind_speed.unwrap_or(0.0),
        temperature: details.air_temperature.unwrap_or(0.0),
        pressure: details.air_pressure_at_sea_level.unwrap_or(0.0),
    })
}

#[derive(Debug, Deserialize)]
struct LocationForecast {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    timeseries: Vec<TimeseriesEntry>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesEntry {
    time: DateTime<FixedOffset>,
    data: EntryData,
}

#[derive(Debug, Deserialize)]
struct EntryData {
    instant: InstantBlock,
    next_1_hours: Option<Horizon>,
    next_6_hours: Option<Horizon>,
    next_12_hours: Option<Horizon>,
}

#[derive(Debug, Deserialize)]
struct InstantBlock {
    details: InstantDetails,
}

#[derive(Debug, Deserialize, Default)]
struct InstantDetails {
    air_temperature: Option<f64>,
    air_pressure_at_sea_level: Option<f64>,
    wind_from_direction: Option<f64>,
    wind_speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Horizon {
    summary: HorizonSummary,
    details: Option<HorizonDetails>,
}

#[derive(Debug, Deserialize)]
struct HorizonSummary {
    symbol_code: String,
}

#[derive(Debug, Deserialize)]
struct HorizonDetails {
    precipitation_amount: Option<f64>,
}
