use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::ChainId;

/// Lifecycle of a single submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TxStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl TxStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, TxStatus::Pending)
    }
}

/// Write transactions the rewards panel can submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    Approve,
    Stake,
    Claim,
    Unstake,
}

impl TxKind {
    pub fn label(&self) -> &'static str {
        match self {
            TxKind::Approve => "approve",
            TxKind::Stake => "stake",
            TxKind::Claim => "claim",
            TxKind::Unstake => "unstake",
        }
    }
}

/// Parameters for one write action.
///
/// `contract` is the contract receiving the call: the vault token for an
/// approval, the staking contract otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub chain_id: ChainId,
    pub contract: Address,
    pub amount: Option<U256>,
    pub spender: Option<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub is_successful: bool,
}

impl TxResult {
    pub fn success() -> Self {
        Self { is_successful: true }
    }

    pub fn failure() -> Self {
        Self { is_successful: false }
    }
}
