use std::str::FromStr;

use serde::Deserialize;

/// What a transfer run does when creating or linking a single issue
/// fails. Either way the failure is logged with the source issue id;
/// fetch failures are always fatal regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemErrorPolicy {
    /// Skip the failed issue and keep going.
    #[default]
    Continue,
    /// Stop the run at the first failed issue.
    Abort,
}

impl ItemErrorPolicy {
    pub fn as_str(&self) -> &str {
        match self {
            ItemErrorPolicy::Continue => "continue",
            ItemErrorPolicy::Abort => "abort",
        }
    }
}

impl FromStr for ItemErrorPolicy {
    type Err = ();

    // Used by the MIG_TRANSFER_ON_ITEM_ERROR override.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "continue" => Ok(ItemErrorPolicy::Continue),
            "abort" => Ok(ItemErrorPolicy::Abort),
            _ => Err(()),
        }
    }
}
