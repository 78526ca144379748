//! # Configuration
//!
//! Options for the derived views are read from a TOML file. Every section
//! and every field is optional.

use crate::command::Command;
use crate::views::ViewOptions;
use color_eyre::Report;
use color_eyre::eyre::WrapErr;
use std::path::PathBuf;
use structopt::StructOpt;
use tokio::fs::read_to_string;
use tracing::instrument;

/// The commandline flags
#[derive(Debug, StructOpt)]
#[structopt(name = "postdoc", about = "Derive views from stored blog post content")]
pub struct Flags {
    /// Which config file to use
    #[structopt(long = "cfg", short = "c")]
    pub cfg: Option<PathBuf>,
    /// What to do
    #[structopt(subcommand)]
    pub cmd: Command,
}

impl Flags {
    #[instrument(skip(self))]
    /// Load the configuration from a file
    pub async fn load_cfg(&self) -> Result<ViewOptions, Report> {
        match &self.cfg {
            Some(cfg) => {
                let cfg_string: String = read_to_string(cfg)
                    .await
                    .wrap_err_with(|| format!("Could not read config file {}", cfg.display()))?;
                parse_cfg(&cfg_string)
            }
            None => Ok(ViewOptions::default()),
        }
    }
}

/// Parse the contents of a config file
pub fn parse_cfg(cfg_string: &str) -> Result<ViewOptions, Report> {
    toml::from_str(cfg_string).wrap_err("Could not parse config file")
}
