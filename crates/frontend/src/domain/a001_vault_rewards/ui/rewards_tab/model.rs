use alloy_primitives::U256;
use contracts::shared::amount::TokenAmount;
use contracts::shared::transaction::TxStatus;

/// The vault token is approved for staking when the allowance covers the
/// whole held balance
pub fn is_approved(allowance: U256, balance: U256) -> bool {
    allowance >= balance
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub label: &'static str,
    pub disabled: bool,
    pub busy: bool,
}

/// Inputs the three panel buttons are derived from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelSnapshot {
    pub wallet_active: bool,
    /// `None` when the query is disabled or failed; counts as zero
    pub allowance: Option<U256>,
    pub allowance_loading: bool,
    pub vault_balance: TokenAmount,
    pub staked: TokenAmount,
    pub reward: TokenAmount,
    pub approve_status: TxStatus,
    pub stake_status: TxStatus,
    pub claim_status: TxStatus,
    pub unstake_status: TxStatus,
}

impl PanelSnapshot {
    pub fn is_approved(&self) -> bool {
        is_approved(self.allowance.unwrap_or_default(), self.vault_balance.raw)
    }

    pub fn stake_button(&self) -> ButtonState {
        ButtonState {
            label: if self.is_approved() { "Stake" } else { "Approve" },
            disabled: !self.wallet_active
                || self.allowance_loading
                || !self.vault_balance.is_positive(),
            busy: self.stake_status.is_pending()
                || self.approve_status.is_pending()
                || self.allowance_loading,
        }
    }

    pub fn claim_button(&self) -> ButtonState {
        ButtonState {
            label: "Claim",
            disabled: !self.wallet_active || self.reward.is_zero(),
            busy: self.claim_status.is_pending(),
        }
    }

    pub fn unstake_button(&self) -> ButtonState {
        ButtonState {
            label: "Unstake + Claim",
            disabled: !self.wallet_active || !self.staked.is_positive(),
            busy: self.unstake_status.is_pending(),
        }
    }
}
