//! Collaborators injected into the rewards panel
//!
//! The panel never reaches for globals: wallet state, stores, the allowance
//! reader and the transaction actions are handed to it at construction. The
//! app shell wires the web3-backed implementations from `shared::web3`,
//! tests wire in-memory ones.

use std::rc::Rc;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use contracts::domain::a002_staking_rewards::{StakingPosition, StakingRewardsInfo};
use contracts::domain::a003_token::TokenBalance;
use contracts::shared::transaction::{ActionRequest, TxResult, TxStatus};
use contracts::shared::ChainId;

/// Receives intermediate status transitions of a submitted transaction
pub type StatusHandler = Rc<dyn Fn(TxStatus)>;

#[async_trait(?Send)]
pub trait TransactionActions {
    /// `approve(spender, amount)` on `request.contract`
    async fn approve(&self, request: ActionRequest, status: StatusHandler) -> TxResult;
    /// `stake(amount)` on the staking contract
    async fn stake(&self, request: ActionRequest, status: StatusHandler) -> TxResult;
    /// Withdraw the full stake and claim pending rewards
    async fn unstake(&self, request: ActionRequest, status: StatusHandler) -> TxResult;
    /// Claim pending rewards
    async fn claim(&self, request: ActionRequest, status: StatusHandler) -> TxResult;
}

/// Token balances of the connected wallet
#[async_trait(?Send)]
pub trait BalanceStore {
    /// Current record, or a zero placeholder when the token is unknown
    fn token(&self, address: Address, chain_id: ChainId) -> TokenBalance;
    async fn refresh(&self);
}

/// Staking contracts and the connected wallet's positions in them
#[async_trait(?Send)]
pub trait StakingRewardsStore {
    fn staking_for_vault(&self, vault: Address) -> Option<Address>;
    fn rewards(&self, staking: Address) -> Option<StakingRewardsInfo>;
    fn position(&self, staking: Address) -> Option<StakingPosition>;
    async fn refresh(&self);
}

#[async_trait(?Send)]
pub trait AllowanceReader {
    async fn allowance(
        &self,
        chain_id: ChainId,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, String>;
}

/// Handle to a cached allowance query
pub trait AllowanceQuery {
    fn refetch(&self);
}

/// Everything the rewards panel needs besides the wallet
#[derive(Clone)]
pub struct RewardsServices {
    pub actions: Rc<dyn TransactionActions>,
    pub balances: Rc<dyn BalanceStore>,
    pub staking: Rc<dyn StakingRewardsStore>,
    pub allowance: Rc<dyn AllowanceReader>,
}
