//! CLI argument definitions using clap.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use edu_dashboard::DashboardConfig;

/// Indonesia education progress dashboard
#[derive(Parser)]
#[command(name = "edu-dashboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Wide indicator table (overrides the config file)
    #[arg(long, value_name = "FILE")]
    pub indicators: Option<PathBuf>,

    /// PISA score table (overrides the config file)
    #[arg(long, value_name = "FILE")]
    pub pisa: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Config file values with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::load(path)?,
            None => DashboardConfig::default(),
        };
        if let Some(path) = &self.indicators {
            config.indicator_path = path.clone();
        }
        if let Some(path) = &self.pisa {
            config.pisa_path = path.clone();
        }
        Ok(config)
    }
}
