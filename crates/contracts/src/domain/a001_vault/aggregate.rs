use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::shared::ChainId;

/// Vault whose receipt token can be staked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultDescriptor {
    pub address: Address,
    pub chain_id: ChainId,
    pub decimals: u8,
    pub symbol: String,
}
