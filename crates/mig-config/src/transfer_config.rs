use crate::ItemErrorPolicy;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TransferConfig {
    pub on_item_error: ItemErrorPolicy,
}
