use clap::{Parser, Subcommand};

/// Command-line interface definition for tapfeed
/// Live tap-in feed simulator for the NOVA attendance dashboard
#[derive(Parser, Debug)]
#[command(
    name = "tapfeed",
    version = env!("CARGO_PKG_VERSION"),
    about = "Simulated live tap-in feed: rotates a roster of check-ins on a fixed cadence",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Run in test mode (no config file written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the default configuration file
    Init,

    /// Show the configuration file
    Config {
        /// Print the effective configuration to stdout
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,
    },

    /// Print the feed once, with outcomes and a summary
    Show {
        /// Seed file (.yml, .yaml or .json); defaults to the configured or built-in roster
        #[arg(long = "seed")]
        seed: Option<String>,
    },

    /// Run the live feed and re-render it on every tick
    Monitor {
        /// Seed file (.yml, .yaml or .json); defaults to the configured or built-in roster
        #[arg(long = "seed")]
        seed: Option<String>,

        /// Seconds between rotations (overrides `interval_secs`)
        #[arg(long = "interval", value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// Stop after this many ticks instead of running until Ctrl-C
        #[arg(long = "ticks")]
        ticks: Option<u64>,
    },
}
