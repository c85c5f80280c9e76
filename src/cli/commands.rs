//! CLI command definitions

use crate::config::NegotiationConfig;
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "bargain-wala")]
#[command(about = "Bargain Wala - haggle over your shopping cart", long_about = None)]
pub struct Cli {
    /// JSON file with negotiation settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the settlement delay in milliseconds
    #[arg(short, long, global = true)]
    pub delay_ms: Option<u64>,

    /// Print the final cart as JSON; stdout then carries nothing else
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolve the negotiation config: file (or defaults), then flag overrides
    pub fn load_config(&self) -> Result<NegotiationConfig> {
        let config = match &self.config {
            Some(path) => NegotiationConfig::from_file(path)?,
            None => NegotiationConfig::default(),
        };

        Ok(match self.delay_ms {
            Some(ms) => config.with_delay(Duration::from_millis(ms)),
            None => config,
        })
    }

    /// Whether store events and notices are printed as the session runs
    pub fn streams_events(&self) -> bool {
        !self.json
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the products the scanner recognises
    Catalog,

    /// Quote a price for one product and wait for the settlement
    Bargain {
        /// Product name (looked up in the catalog unless --retail is given)
        #[arg(short, long)]
        product: String,

        /// Your offer
        #[arg(short, long)]
        quote: String,

        /// Retail price for a product not in the catalog
        #[arg(short, long)]
        retail: Option<String>,
    },

    /// Run a scripted shopping session
    Demo,
}
