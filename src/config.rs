use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::parser::DataPaths;

#[derive(Debug, Parser)]
#[command(name = "party-planner")]
#[command(about = "Spend a party budget on the food and drinks guests asked for")]
pub struct Cli {
    #[command(flatten)]
    pub data: DataArgs,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "PARTY_LOG", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Locations of the three source files
#[derive(Debug, Clone, Args)]
pub struct DataArgs {
    /// Drink prices, one `<name>:price` per line
    #[arg(long, env = "PARTY_DRINKS_FILE", default_value = "data/drinks.txt", global = true)]
    pub drinks: PathBuf,

    /// Food prices, one `<name>:price` per line
    #[arg(long, env = "PARTY_FOOD_FILE", default_value = "data/food.txt", global = true)]
    pub food: PathBuf,

    /// Guest blocks: name, preferences, blank line
    #[arg(long, env = "PARTY_PEOPLE_FILE", default_value = "data/people.txt", global = true)]
    pub people: PathBuf,
}

impl DataArgs {
    pub fn paths(&self) -> DataPaths {
        DataPaths {
            drinks: self.drinks.clone(),
            food: self.food.clone(),
            people: self.people.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan purchases for a budget and print the result
    Plan {
        /// Budget, e.g. 120 or 1,250.00
        #[arg(short, long)]
        budget: String,

        /// Print the plan as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also write the text report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the shopping list as CSV to this file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Serve the planner over HTTP
    Web {
        #[arg(short, long, env = "PARTY_PORT", default_value = "8080")]
        port: u16,
    },
}

/// Installs the global tracing subscriber; logs go to stderr
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
