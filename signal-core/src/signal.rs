//! Condition classification and signal rendering.
//!
//! A signal is one color per forecast day (bounded by the device width)
//! plus an HTML report covering every grouped day.

use serde::Serialize;

use crate::error::Error;
use crate::forecast::SelectionStrategy;
use crate::model::{Day, Period, Units};

/// The six fixed display colors.
///
/// `Clear` and `Sunny` intentionally share the same hex value; they are one
/// canonical "clear" color with two historical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Clear,
    Cloudy,
    Shower,
    Snow,
    Storm,
    Sunny,
}

impl Color {
    pub const fn hex(self) -> &'static str {
        match self {
            Color::Clear | Color::Sunny => "#FFFF00",
            Color::Cloudy => "#FF00FF",
            Color::Shower => "#0000FF",
            Color::Snow => "#FFFFFF",
            Color::Storm => "#FF0000",
        }
    }
}

/// Map a period's condition text to a display color.
///
/// Ordered keyword match, first hit wins; anything unrecognized counts as
/// clear sky.
pub fn color_for(period: &Period) -> Color {
    let text = period.symbol.to_lowercase();
    if text.contains("snow") {
        Color::Snow
    } else if text.contains("storm") {
        Color::Storm
    } else if text.contains("rain") || text.contains("shower") {
        Color::Shower
    } else if text.contains("cloud") {
        Color::Cloudy
    } else {
        Color::Clear
    }
}

// The sink speaks hex strings, not variant names.
impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

/// Payload handed to the render sink.
#[derive(Debug, Clone, Serialize)]
pub struct Signal {
    pub name: String,
    pub points: Vec<Color>,
    pub message: String,
    pub is_error: bool,
}

impl Signal {
    /// An error signal carries only a message for the host to display.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            points: Vec::new(),
            message: message.into(),
            is_error: true,
        }
    }
}

/// Render grouped days into a signal.
///
/// Colors are computed for at most `width` days (one indicator light per
/// day); the HTML report always covers the full grouped range. An empty
/// `days` slice renders an empty signal rather than failing.
pub fn render(
    days: &[Day],
    width: usize,
    units: Units,
    strategy: SelectionStrategy,
    name: &str,
) -> Result<Signal, Error> {
    let mut points = Vec::with_capacity(width.min(days.len()));
    for day in days.iter().take(width) {
        points.push(color_for(strategy.choose(day)?));
    }

    let mut messages = Vec::new();
    for day in days {
        messages.push(format!(
            r#"<div style="color: red;"><strong>{}:</strong></div>"#,
            day.date.format("%A, %B %-d")
        ));
        messages.push("<div>".to_owned());
        for (index, period) in day.periods.iter().enumerate() {
            messages.push(period_text(period, units));
            if index + 1 != day.periods.len() {
                messages.push("-".to_owned());
            }
        }
        messages.push("</div></br>".to_owned());
    }

    Ok(Signal {
        name: name.to_owned(),
        points,
        message: messages.join("\n"),
        is_error: false,
    })
}

/// One report line: `HH:MM[-HH:MM] <condition>, <temperature><unit>`.
///
/// The end time only appears for periods spanning more than an hour, i.e.
/// samples carrying a 6- or 12-hour horizon.
pub fn period_text(period: &Period, units: Units) -> String {
    let temperature = match units {
        Units::Imperial => {
            format!("{}°F", (period.temperature * 1.8 + 32.0).round() as i64)
        }
        Units::Metric => format!("{}°C", period.temperature),
    };

    let mut time = period.from.format("%H:%M").to_string();
    if let Some(to) = period.to {
        if to - period.from > chrono::Duration::hours(1) {
            time = format!("{time}-{}", to.format("%H:%M"));
        }
    }

    format!("{time} {}, {temperature}", period.symbol)
}
