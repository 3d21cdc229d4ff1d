use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Transfer every qualifying issue from the source to the target tracker
    Run,

    /// Validate the configuration and resolve the target endpoint (no network)
    Check,

    /// Write a commented starter configuration file
    Init,
}
