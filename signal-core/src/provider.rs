use crate::error::Error;
use crate::model::Period;
use crate::provider::{legacy_xml::LegacyXmlProvider, met_json::JsonProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod legacy_xml;
pub mod met_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderId {
    /// met.no locationforecast 2.0 (JSON).
    #[default]
    Json,
    /// The retired yr.no `forecast.xml` tabular feed.
    LegacyXml,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Json => "json",
            ProviderId::LegacyXml => "legacy-xml",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Json, ProviderId::LegacyXml]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, anyhow::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "json" => Ok(ProviderId::Json),
            "legacy-xml" => Ok(ProviderId::LegacyXml),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: json, legacy-xml."
            )),
        }
    }
}

/// Fetch capability injected into the applet: retrieve one forecast and
/// normalize it into canonical periods, in chronological order.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, url: &str) -> Result<Vec<Period>, Error>;
}

/// Construct a provider for an explicit ProviderId.
pub fn provider_for(id: ProviderId) -> Box<dyn ForecastProvider> {
    match id {
        ProviderId::Json => Box::new(JsonProvider::new()),
        ProviderId::LegacyXml => Box::new(LegacyXmlProvider::new()),
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Error pages are arbitrary text; back the cut off to a char boundary.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn truncate_body_caps_long_payloads() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // A multibyte char straddling the cut-off must not split.
        let body = format!("{}é{}", "x".repeat(199), "y".repeat(100));
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated, format!("{}...", "x".repeat(199)));

        let all_multibyte = "é".repeat(300);
        let truncated = truncate_body(&all_multibyte);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.trim_end_matches("...").chars().count(), 100);
    }
}
