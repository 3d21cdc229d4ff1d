use crate::commands::Commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "mig")]
#[command(about = "Transfer issues between trackers over their REST APIs")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Config file (default: $MIG_CONFIG_DIR/config.toml, else ./.mig/config.toml)
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,
}
