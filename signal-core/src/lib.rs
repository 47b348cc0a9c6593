//! Core library for the weather `signal` applet.
//!
//! This crate defines:
//! - Configuration handling
//! - The searchable city catalog
//! - Abstraction over forecast providers (met.no JSON, legacy yr.no XML)
//! - The day-grouping / period-selection / color-classification pipeline
//! - Signal rendering (color points plus an HTML report)
//!
//! It is used by `signal-cli`, but can also be reused by other binaries or services.

pub mod applet;
pub mod cities;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod signal;

pub use applet::Applet;
pub use cities::CityOption;
pub use config::{CityConfig, Config};
pub use error::Error;
pub use forecast::SelectionStrategy;
pub use model::{Day, Period, Units};
pub use provider::{ForecastProvider, ProviderId};
pub use signal::{Color, Signal};
