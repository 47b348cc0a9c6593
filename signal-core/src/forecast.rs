//! Day grouping and representative-period selection.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{Day, Period};

/// Lookahead cap: the display never shows more than 8 days.
pub const MAX_FORECAST_DAYS: usize = 8;

/// Fold a chronologically ordered sequence of periods into calendar-day
/// buckets, assigning each period its running 1-based sequence number.
///
/// The cap is checked when a day closes, never mid-day, so a day already in
/// progress always finishes; periods past the cap are ignored.
pub fn group_by_day(periods: Vec<Period>) -> Vec<Day> {
    let mut days: Vec<Day> = Vec::new();
    let mut current: Option<Day> = None;

    for (index, mut period) in periods.into_iter().enumerate() {
        period.number = index as u32 + 1;
        let date = period.from.date_naive();

        match current {
            Some(ref mut day) if day.date == date => day.periods.push(period),
            _ => {
                if let Some(day) = current.take() {
                    days.push(day);
                    if days.len() == MAX_FORECAST_DAYS {
                        return days;
                    }
                }
                current = Some(Day::new(date, period));
            }
        }
    }

    if let Some(day) = current {
        days.push(day);
    }

    days
}

/// How the single representative period of a day is chosen.
///
/// Two heuristics exist in the wild; they are kept as distinct strategies
/// rather than merged. `DaylightWindow` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    #[default]
    DaylightWindow,
    IndexTrim,
}

impl SelectionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStrategy::DaylightWindow => "daylight-window",
            SelectionStrategy::IndexTrim => "index-trim",
        }
    }

    /// Pick the most representative period of a day.
    pub fn choose<'a>(&self, day: &'a Day) -> Result<&'a Period, Error> {
        match self {
            SelectionStrategy::DaylightWindow => choose_daylight(day),
            SelectionStrategy::IndexTrim => choose_index_trim(day),
        }
    }
}

impl std::fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SelectionStrategy {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, anyhow::Error> {
        match value.to_lowercase().as_str() {
            "daylight-window" => Ok(SelectionStrategy::DaylightWindow),
            "index-trim" => Ok(SelectionStrategy::IndexTrim),
            _ => Err(anyhow::anyhow!(
                "Unknown selection strategy '{value}'. Supported: daylight-window, index-trim."
            )),
        }
    }
}

/// Keep samples inside the daytime window (hour 7..=17), then take the one
/// with the strictly greatest precipitation; the earlier period wins ties.
///
/// Evening samples (hour > 17) end the window, unless the day's first sample
/// already falls in the evening, in which case only evening data exists and
/// it is used as-is.
fn choose_daylight(day: &Day) -> Result<&Period, Error> {
    let use_evening = day.periods.first().is_some_and(|p| p.from.hour() > 17);

    let mut eligible: Vec<&Period> = Vec::new();
    for period in &day.periods {
        let hour = period.from.hour();
        if hour < 7 {
            continue;
        }
        if hour > 17 && !use_evening {
            break;
        }
        eligible.push(period);
    }

    eligible
        .into_iter()
        .reduce(|best, p| if p.precipitation > best.precipitation { p } else { best })
        .ok_or(Error::NoData(day.date))
}

/// The coarser positional heuristic: drop the overnight period when the day
/// has exactly four samples, drop the late-night period when more than one
/// remains, then keep the wetter of the first two survivors.
fn choose_index_trim(day: &Day) -> Result<&Period, Error> {
    let mut periods: &[Period] = &day.periods;
    if periods.len() == 4 {
        periods = &periods[1..];
    }
    if periods.len() > 1 {
        periods = &periods[..periods.len() - 1];
    }

    match periods {
        [] => Err(Error::NoData(day.date)),
        [only] => Ok(only),
        [first, second, ..] => {
            Ok(if first.precipitation > second.precipitation { first } else { second })
        }
    }
}
