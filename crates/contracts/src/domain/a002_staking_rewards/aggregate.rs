use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::shared::ChainId;

// ============================================================================
// Registry entry
// ============================================================================

/// StakingRewards contract accepting a vault's token as stake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingRewardsInfo {
    /// Staking contract
    pub address: Address,
    /// Staked token (the vault's receipt token)
    pub vault: Address,
    /// Token paid out as rewards
    pub rewards_token: Address,
    pub chain_id: ChainId,
}

// ============================================================================
// User position
// ============================================================================

/// Connected user's position in one staking contract, raw amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StakingPosition {
    pub stake: U256,
    pub reward: U256,
}
