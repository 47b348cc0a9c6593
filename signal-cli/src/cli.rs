use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};

use signal_core::{Applet, Config, SelectionStrategy, Signal, Units};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "signal", version, about = "Weather signal applet")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pick a city, units and display width interactively.
    Configure,

    /// Search the city catalog.
    Cities {
        /// Substring to match against city labels; empty lists everything.
        #[arg(default_value = "")]
        query: String,

        /// Maximum number of results to print.
        #[arg(long, default_value_t = 25)]
        limit: usize,
    },

    /// Run a single fetch-and-render cycle and print the signal.
    Run {
        /// Override the configured selection strategy.
        #[arg(long)]
        strategy: Option<String>,
    },

    /// Poll the forecast service on the configured cadence.
    Watch,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Cities { query, limit } => {
                let applet = Applet::new(Config::load()?);
                let options = applet.options(&query)?;
                for option in options.iter().take(limit) {
                    println!("{}\t{}", option.value, option.key);
                }
                if options.is_empty() {
                    println!("No cities matched '{query}'.");
                }
                Ok(())
            }
            Command::Run { strategy } => {
                let mut config = Config::load()?;
                if let Some(s) = strategy {
                    config.strategy = SelectionStrategy::try_from(s.as_str())?;
                }
                let applet = Applet::new(config);
                match applet.run().await {
                    Some(signal) => print_signal(&signal),
                    None => println!("Nothing to display this cycle."),
                }
                Ok(())
            }
            Command::Watch => {
                let applet = Applet::new(Config::load()?);
                let period = Duration::from_secs(applet.config().poll_minutes * 60);
                let mut ticker = tokio::time::interval(period);
                loop {
                    ticker.tick().await;
                    println!("--- cycle at {} ---", chrono::Local::now().format("%Y-%m-%d %H:%M"));
                    if let Some(signal) = applet.run().await {
                        print_signal(&signal);
                    }
                }
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let applet = Applet::new(config.clone());

    let query = Text::new("City search:")
        .with_help_message("Substring of the city, region or country name")
        .prompt()?;

    let options = applet.options(&query)?;
    if options.is_empty() {
        anyhow::bail!("No cities matched '{query}'. Try a different search.");
    }

    let labels: Vec<String> = options.iter().map(|o| o.value.clone()).collect();
    let picked = Select::new("Select a city:", labels).prompt()?;
    let chosen = options
        .into_iter()
        .find(|o| o.value == picked)
        .context("selected city disappeared from the option list")?;

    let unit_names: Vec<&str> = Units::all().iter().map(Units::as_str).collect();
    let units = Select::new("Units:", unit_names).prompt()?;

    let width = CustomType::<usize>::new("Display width (indicator lights):")
        .with_default(config.width)
        .with_error_message("Please enter a whole number")
        .prompt()?;

    config.set_city(chosen.key, chosen.value);
    config.units = Units::try_from(units)?;
    config.width = width;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn print_signal(signal: &Signal) {
    if signal.is_error {
        eprintln!("{}", signal.message);
        return;
    }

    let swatch: Vec<&str> = signal.points.iter().map(|color| color.hex()).collect();
    println!("{} [{}]", signal.name, swatch.join(" "));
    println!("{}", signal.message);
}
