//! Legacy yr.no `forecast.xml` adapter.
//!
//! The retired tabular feed carries pre-bucketed periods under
//! `<weatherdata><forecast><tabular><time .../>`. Timestamps have no zone
//! designator and are taken at face value.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::debug;

use crate::error::Error;
use crate::model::Period;
use crate::provider::truncate_body;

use super::ForecastProvider;

const HTTP_USER_AGENT: &str = concat!("weather-signal/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default)]
pub struct LegacyXmlProvider {
    http: Client,
}

impl LegacyXmlProvider {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl ForecastProvider for LegacyXmlProvider {
    async fn fetch_forecast(&self, url: &str) -> Result<Vec<Period>, Error> {
        debug!(url, "requesting legacy forecast.xml");

        let res = self.http.get(url).header(USER_AGENT, HTTP_USER_AGENT).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::Status { status, body: truncate_body(&body) });
        }

        parse_forecast(&body)
    }
}

/// Parse a tabular forecast document into chronological periods.
pub fn parse_forecast(body: &str) -> Result<Vec<Period>, Error> {
    let parsed: WeatherData = serde_xml_rs::from_str(body)
        .map_err(|e| Error::Parse(format!("invalid forecast XML: {e}")))?;

    parsed.forecast.tabular.times.iter().map(revive).collect()
}

fn revive(entry: &TimeEntry) -> Result<Period, Error> {
    let to = match &entry.to {
        Some(stamp) => Some(parse_stamp(stamp)?),
        None => None,
    };

    Ok(Period {
        from: parse_stamp(&entry.from)?,
        to,
        number: 0,
        symbol: entry.symbol.name.clone(),
        precipitation: entry.precipitation.value,
        wind_direction: entry.wind_direction.deg,
        wind_speed: entry.wind_speed.mps,
        temperature: entry.temperature.value,
        pressure: entry.pressure.value,
    })
}

/// The feed writes local timestamps without an offset; RFC 3339 stamps are
/// accepted too for the odd mirror that adds one.
fn parse_stamp(stamp: &str) -> Result<DateTime<FixedOffset>, Error> {
    DateTime::parse_from_rfc3339(stamp)
        .or_else(|_| {
            NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S")
                .map(|naive| naive.and_utc().fixed_offset())
        })
        .map_err(|e| Error::Parse(format!("bad timestamp {stamp:?}: {e}")))
}

#[derive(Debug, Deserialize)]
struct WeatherData {
    forecast: Forecast,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    tabular: Tabular,
}

#[derive(Debug, Deserialize)]
struct Tabular {
    #[serde(rename = "time", default)]
    times: Vec<TimeEntry>,
}

#[derive(Debug, Deserialize)]
struct TimeEntry {
    from: String,
    to: Option<String>,
    symbol: SymbolTag,
    precipitation: PrecipitationTag,
    #[serde(rename = "windDirection")]
    wind_direction: WindDirectionTag,
    #[serde(rename = "windSpeed")]
    wind_speed: WindSpeedTag,
    temperature: ValueTag,
    pressure: ValueTag,
}

#[derive(Debug, Deserialize)]
struct SymbolTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PrecipitationTag {
    #[serde(default)]
    value: f64,
}

#[derive(Debug, Deserialize)]
struct WindDirectionTag {
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct WindSpeedTag {
    mps: f64,
}

#[derive(Debug, Deserialize)]
struct ValueTag {
    value: f64,
}
