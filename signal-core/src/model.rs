use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Temperature unit system for the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// One forecast sample, normalized from either provider.
///
/// `from` is always present; `to` is `None` when the source gives no
/// duration. `number` is the 1-based index within the whole forecast,
/// assigned by the day grouper.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    pub from: DateTime<FixedOffset>,
    pub to: Option<DateTime<FixedOffset>>,
    pub number: u32,
    pub symbol: String,
    /// Millimeters over the period, never negative.
    pub precipitation: f64,
    /// Compass bearing the wind blows from, degrees.
    pub wind_direction: f64,
    /// Meters per second.
    pub wind_speed: f64,
    /// Celsius.
    pub temperature: f64,
    /// hPa, informational only.
    pub pressure: f64,
}

/// A calendar-day bucket of chronologically contiguous periods.
///
/// Non-empty by construction: a `Day` is only created around its first
/// period, and only the grouper appends to it.
#[derive(Debug, Clone)]
pub struct Day {
    pub date: NaiveDate,
    pub periods: Vec<Period>,
}

impl Day {
    pub fn new(date: NaiveDate, first: Period) -> Self {
        Self { date, periods: vec![first] }
    }
}
