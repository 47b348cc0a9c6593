//! One fetch-and-render cycle, wired together.
//!
//! The host owns the poll timer; each invocation of [`Applet::run`] builds
//! fresh periods and days from a single fetch, so no state crosses cycles
//! except the read-only configuration.

use tracing::{error, info, warn};

use crate::cities::{self, CityOption, MAX_SEARCH_RESULTS};
use crate::config::{CityConfig, Config};
use crate::error::Error;
use crate::forecast::group_by_day;
use crate::provider::{ForecastProvider, provider_for};
use crate::signal::{Signal, render};

#[derive(Debug)]
pub struct Applet {
    config: Config,
    provider: Box<dyn ForecastProvider>,
}

impl Applet {
    pub fn new(config: Config) -> Self {
        let provider = provider_for(config.provider);
        Self { config, provider }
    }

    /// Inject a custom fetch capability, mainly for tests.
    pub fn with_provider(config: Config, provider: Box<dyn ForecastProvider>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one cycle.
    ///
    /// `None` means there is nothing to display this cycle: either no city
    /// is configured, or the forecast service was unreachable and the next
    /// poll will retry. Every other failure becomes an error signal for the
    /// render sink.
    pub async fn run(&self) -> Option<Signal> {
        let Some(city) = self.config.city.as_ref() else {
            info!("no city configured, skipping cycle");
            return None;
        };

        info!(url = %city.url, label = %city.label, "fetching forecast");

        match self.cycle(city).await {
            Ok(signal) => Some(signal),
            Err(err) if err.is_connectivity() => {
                warn!(%err, "forecast service unreachable, skipping cycle");
                None
            }
            Err(err) => {
                error!(%err, "forecast cycle failed");
                Some(Signal::error(format!(
                    "The weather forecast service returned an error. Detail: {err}"
                )))
            }
        }
    }

    async fn cycle(&self, city: &CityConfig) -> Result<Signal, Error> {
        let periods = self.provider.fetch_forecast(&city.url).await?;
        let days = group_by_day(periods);
        render(&days, self.config.width, self.config.units, self.config.strategy, &city.label)
    }

    /// Search the city catalog. The reference file is re-read on every call.
    pub fn options(&self, query: &str) -> Result<Vec<CityOption>, Error> {
        let lines = cities::load_lines(&self.config.cities_file)?;
        let options = cities::to_options(&lines);
        Ok(cities::search(&options, query, MAX_SEARCH_RESULTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Units;
    use crate::signal::Color;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FORECAST: &str = r#"{"properties": {"timeseries": [
        {
            "time": "2022-11-04T14:00:00Z",
            "data": {
                "instant": {"details": {"air_temperature": 12.1}},
                "next_1_hours": {
                    "summary": {"symbol_code": "cloudy"},
                    "details": {"precipitation_amount": 0}
                }
            }
        },
        {
            "time": "2022-11-05T12:00:00Z",
            "data": {
                "instant": {"details": {"air_temperature": 10.8}},
                "next_1_hours": {
                    "summary": {"symbol_code": "rain"},
                    "details": {"precipitation_amount": 0.3}
                }
            }
        }
    ]}}"#;

    fn config_for(url: &str) -> Config {
        let mut config = Config::default();
        config.set_city(url.to_owned(), "Austin, Texas (USA)".to_owned());
        config
    }

    #[tokio::test]
    async fn run_without_a_city_produces_no_signal() {
        let applet = Applet::new(Config::default());
        assert!(applet.run().await.is_none());
    }

    #[tokio::test]
    async fn run_renders_a_signal_from_a_live_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FORECAST))
            .mount(&server)
            .await;

        let applet = Applet::new(config_for(&server.uri()));
        let signal = applet.run().await.expect("signal expected");

        assert!(!signal.is_error);
        assert_eq!(signal.name, "Austin, Texas (USA)");
        assert_eq!(signal.points, vec![Color::Cloudy, Color::Shower]);
        assert!(signal.message.contains("14:00 cloudy, 12.1°C"));
    }

    #[tokio::test]
    async fn run_converts_units_from_config() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FORECAST))
            .mount(&server)
            .await;

        let mut config = config_for(&server.uri());
        config.units = Units::Imperial;

        let applet = Applet::new(config);
        let signal = applet.run().await.expect("signal expected");
        assert!(signal.message.contains("14:00 cloudy, 54°F"));
    }

    #[tokio::test]
    async fn run_surfaces_server_errors_as_an_error_signal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let applet = Applet::new(config_for(&server.uri()));
        let signal = applet.run().await.expect("error signal expected");

        assert!(signal.is_error);
        assert!(signal.message.contains("returned an error"));
    }

    #[tokio::test]
    async fn run_suppresses_connectivity_failures() {
        // Nothing listens on this address; the fetch fails at connect time.
        let applet = Applet::new(config_for("http://127.0.0.1:9"));
        assert!(applet.run().await.is_none());
    }
}
