use std::rc::Rc;

use alloy_primitives::{Address, U256};
use contracts::domain::a001_vault::VaultDescriptor;
use contracts::shared::transaction::{ActionRequest, TxResult};

use crate::shared::services::{
    AllowanceQuery, BalanceStore, StakingRewardsStore, StatusHandler, TransactionActions,
};

/// Runs the panel's four actions and the follow-up refreshes.
///
/// Amounts are always the full raw vault balance at click time; display
/// trimming never reaches this layer.
pub struct RewardsController {
    vault: VaultDescriptor,
    actions: Rc<dyn TransactionActions>,
    balances: Rc<dyn BalanceStore>,
    staking: Rc<dyn StakingRewardsStore>,
    allowance: Rc<dyn AllowanceQuery>,
}

impl RewardsController {
    pub fn new(
        vault: VaultDescriptor,
        actions: Rc<dyn TransactionActions>,
        balances: Rc<dyn BalanceStore>,
        staking: Rc<dyn StakingRewardsStore>,
        allowance: Rc<dyn AllowanceQuery>,
    ) -> Self {
        Self {
            vault,
            actions,
            balances,
            staking,
            allowance,
        }
    }

    fn staking_address(&self) -> Option<Address> {
        let address = self.staking.staking_for_vault(self.vault.address);
        if address.is_none() {
            log::warn!("Vault {} has no staking contract", self.vault.address);
        }
        address
    }

    fn vault_balance_raw(&self) -> U256 {
        self.balances
            .token(self.vault.address, self.vault.chain_id)
            .balance
            .raw
    }

    fn staking_request(&self, staking: Address, amount: Option<U256>) -> ActionRequest {
        ActionRequest {
            chain_id: self.vault.chain_id,
            contract: staking,
            amount,
            spender: None,
        }
    }

    /// Refresh balances and staking positions concurrently
    pub async fn refresh_data(&self) {
        futures::join!(self.balances.refresh(), self.staking.refresh());
    }

    /// Approve the staking contract for the full vault balance
    pub async fn approve(&self, status: StatusHandler) -> TxResult {
        let Some(staking) = self.staking_address() else {
            return TxResult::failure();
        };
        let request = ActionRequest {
            chain_id: self.vault.chain_id,
            contract: self.vault.address,
            amount: Some(self.vault_balance_raw()),
            spender: Some(staking),
        };
        let result = self.actions.approve(request, status).await;
        if result.is_successful {
            self.allowance.refetch();
        }
        result
    }

    /// Stake the full vault balance
    pub async fn stake(&self, status: StatusHandler) -> TxResult {
        let Some(staking) = self.staking_address() else {
            return TxResult::failure();
        };
        let request = self.staking_request(staking, Some(self.vault_balance_raw()));
        let result = self.actions.stake(request, status).await;
        if result.is_successful {
            self.refresh_data().await;
        }
        result
    }

    /// The stake button: approve first, stake once approved
    pub async fn stake_or_approve(
        &self,
        is_approved: bool,
        approve_status: StatusHandler,
        stake_status: StatusHandler,
    ) -> TxResult {
        if is_approved {
            self.stake(stake_status).await
        } else {
            self.approve(approve_status).await
        }
    }

    pub async fn claim(&self, status: StatusHandler) -> TxResult {
        let Some(staking) = self.staking_address() else {
            return TxResult::failure();
        };
        let result = self
            .actions
            .claim(self.staking_request(staking, None), status)
            .await;
        if result.is_successful {
            self.refresh_data().await;
        }
        result
    }

    /// Withdraw the whole stake; the contract claims pending rewards too
    pub async fn unstake(&self, status: StatusHandler) -> TxResult {
        let Some(staking) = self.staking_address() else {
            return TxResult::failure();
        };
        let result = self
            .actions
            .unstake(self.staking_request(staking, None), status)
            .await;
        if result.is_successful {
            self.refresh_data().await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::is_approved;
    use super::*;
    use async_trait::async_trait;
    use contracts::domain::a002_staking_rewards::{StakingPosition, StakingRewardsInfo};
    use contracts::domain::a003_token::TokenBalance;
    use contracts::shared::amount::TokenAmount;
    use contracts::shared::transaction::{TxKind, TxStatus};
    use contracts::shared::ChainId;
    use std::cell::{Cell, RefCell};

    const CHAIN: ChainId = 10;

    fn vault_address() -> Address {
        Address::repeat_byte(0x01)
    }

    fn staking_address() -> Address {
        Address::repeat_byte(0x02)
    }

    fn vault() -> VaultDescriptor {
        VaultDescriptor {
            address: vault_address(),
            chain_id: CHAIN,
            decimals: 18,
            symbol: "yvUSDC".to_string(),
        }
    }

    struct MockActions {
        succeed: bool,
        calls: RefCell<Vec<(TxKind, ActionRequest)>>,
    }

    impl MockActions {
        fn new(succeed: bool) -> Rc<Self> {
            Rc::new(Self {
                succeed,
                calls: RefCell::new(Vec::new()),
            })
        }

        fn run(&self, kind: TxKind, request: ActionRequest, status: StatusHandler) -> TxResult {
            self.calls.borrow_mut().push((kind, request));
            status(TxStatus::Pending);
            if self.succeed {
                status(TxStatus::Succeeded);
                TxResult::success()
            } else {
                status(TxStatus::Failed);
                TxResult::failure()
            }
        }
    }

    #[async_trait(?Send)]
    impl TransactionActions for MockActions {
        async fn approve(&self, request: ActionRequest, status: StatusHandler) -> TxResult {
            self.run(TxKind::Approve, request, status)
        }
        async fn stake(&self, request: ActionRequest, status: StatusHandler) -> TxResult {
            self.run(TxKind::Stake, request, status)
        }
        async fn unstake(&self, request: ActionRequest, status: StatusHandler) -> TxResult {
            self.run(TxKind::Unstake, request, status)
        }
        async fn claim(&self, request: ActionRequest, status: StatusHandler) -> TxResult {
            self.run(TxKind::Claim, request, status)
        }
    }

    struct MockBalances {
        vault_raw: U256,
        refreshes: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl BalanceStore for MockBalances {
        fn token(&self, address: Address, chain_id: ChainId) -> TokenBalance {
            let mut balance = TokenBalance::empty(address, chain_id);
            if address == vault_address() {
                balance.balance = TokenAmount::new(self.vault_raw, 18);
            }
            balance
        }

        async fn refresh(&self) {
            self.refreshes.set(self.refreshes.get() + 1);
        }
    }

    struct MockStaking {
        registered: bool,
        refreshes: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl StakingRewardsStore for MockStaking {
        fn staking_for_vault(&self, vault: Address) -> Option<Address> {
            (self.registered && vault == vault_address()).then(staking_address)
        }

        fn rewards(&self, staking: Address) -> Option<StakingRewardsInfo> {
            (staking == staking_address()).then(|| StakingRewardsInfo {
                address: staking,
                vault: vault_address(),
                rewards_token: Address::repeat_byte(0x03),
                chain_id: CHAIN,
            })
        }

        fn position(&self, _staking: Address) -> Option<StakingPosition> {
            None
        }

        async fn refresh(&self) {
            self.refreshes.set(self.refreshes.get() + 1);
        }
    }

    #[derive(Default)]
    struct MockAllowance {
        refetches: Cell<usize>,
    }

    impl AllowanceQuery for MockAllowance {
        fn refetch(&self) {
            self.refetches.set(self.refetches.get() + 1);
        }
    }

    struct Harness {
        actions: Rc<MockActions>,
        balances: Rc<MockBalances>,
        staking: Rc<MockStaking>,
        allowance: Rc<MockAllowance>,
        controller: RewardsController,
    }

    fn harness(succeed: bool, vault_raw: U256, registered: bool) -> Harness {
        let actions = MockActions::new(succeed);
        let balances = Rc::new(MockBalances {
            vault_raw,
            refreshes: Cell::new(0),
        });
        let staking = Rc::new(MockStaking {
            registered,
            refreshes: Cell::new(0),
        });
        let allowance = Rc::new(MockAllowance::default());
        let controller = RewardsController::new(
            vault(),
            actions.clone(),
            balances.clone(),
            staking.clone(),
            allowance.clone(),
        );
        Harness {
            actions,
            balances,
            staking,
            allowance,
            controller,
        }
    }

    fn recorder() -> (StatusHandler, Rc<RefCell<Vec<TxStatus>>>) {
        let seen: Rc<RefCell<Vec<TxStatus>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let handler: StatusHandler = Rc::new(move |s: TxStatus| sink.borrow_mut().push(s));
        (handler, seen)
    }

    #[tokio::test]
    async fn test_unapproved_stake_button_requests_full_approval() {
        let h = harness(true, U256::from(100), true);
        let (approve_status, approve_seen) = recorder();
        let (stake_status, stake_seen) = recorder();

        let is_approved = is_approved(U256::ZERO, U256::from(100));
        let result = h
            .controller
            .stake_or_approve(is_approved, approve_status, stake_status)
            .await;

        assert!(result.is_successful);
        let calls = h.actions.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (kind, request) = &calls[0];
        assert_eq!(*kind, TxKind::Approve);
        assert_eq!(request.contract, vault_address());
        assert_eq!(request.spender, Some(staking_address()));
        assert_eq!(request.amount, Some(U256::from(100)));
        assert_eq!(h.allowance.refetches.get(), 1);
        assert_eq!(h.balances.refreshes.get(), 0);
        assert_eq!(h.staking.refreshes.get(), 0);
        assert_eq!(
            *approve_seen.borrow(),
            vec![TxStatus::Pending, TxStatus::Succeeded]
        );
        assert!(stake_seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failed_approval_does_not_refetch_allowance() {
        let h = harness(false, U256::from(100), true);
        let (approve_status, _) = recorder();
        let result = h.controller.approve(approve_status).await;
        assert!(!result.is_successful);
        assert_eq!(h.allowance.refetches.get(), 0);
    }

    #[tokio::test]
    async fn test_approved_stake_button_stakes_full_balance() {
        let h = harness(true, U256::from(100), true);
        let (approve_status, approve_seen) = recorder();
        let (stake_status, _) = recorder();

        let is_approved = is_approved(U256::from(100), U256::from(100));
        h.controller
            .stake_or_approve(is_approved, approve_status, stake_status)
            .await;

        let calls = h.actions.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (kind, request) = &calls[0];
        assert_eq!(*kind, TxKind::Stake);
        assert_eq!(request.contract, staking_address());
        assert_eq!(request.amount, Some(U256::from(100)));
        assert_eq!(request.spender, None);
        assert!(approve_seen.borrow().is_empty());
        assert_eq!(h.balances.refreshes.get(), 1);
        assert_eq!(h.staking.refreshes.get(), 1);
        assert_eq!(h.allowance.refetches.get(), 0);
    }

    #[tokio::test]
    async fn test_balance_wider_than_u128_is_staked_exactly() {
        let balance = U256::from(u128::MAX) + U256::from(6);
        let h = harness(true, balance, true);
        let (approve_status, _) = recorder();
        let (stake_status, _) = recorder();

        h.controller
            .stake_or_approve(false, approve_status.clone(), stake_status.clone())
            .await;
        h.controller
            .stake_or_approve(true, approve_status, stake_status)
            .await;

        let calls = h.actions.calls.borrow();
        assert_eq!(calls[0].0, TxKind::Approve);
        assert_eq!(calls[0].1.amount, Some(balance));
        assert_eq!(calls[1].0, TxKind::Stake);
        assert_eq!(calls[1].1.amount, Some(balance));
    }

    #[tokio::test]
    async fn test_successful_claim_refreshes_each_store_once() {
        let h = harness(true, U256::ZERO, true);
        let (status, seen) = recorder();

        let result = h.controller.claim(status).await;

        assert!(result.is_successful);
        assert_eq!(h.balances.refreshes.get(), 1);
        assert_eq!(h.staking.refreshes.get(), 1);
        let calls = h.actions.calls.borrow();
        assert_eq!(calls[0].0, TxKind::Claim);
        assert_eq!(calls[0].1.contract, staking_address());
        assert_eq!(calls[0].1.amount, None);
        assert_eq!(seen.borrow().last(), Some(&TxStatus::Succeeded));
    }

    #[tokio::test]
    async fn test_failed_unstake_skips_refresh() {
        let h = harness(false, U256::ZERO, true);
        let (status, seen) = recorder();

        let result = h.controller.unstake(status).await;

        assert!(!result.is_successful);
        assert_eq!(h.actions.calls.borrow()[0].0, TxKind::Unstake);
        assert_eq!(h.balances.refreshes.get(), 0);
        assert_eq!(h.staking.refreshes.get(), 0);
        let last = *seen.borrow().last().unwrap();
        assert!(!last.is_pending());
    }

    #[tokio::test]
    async fn test_vault_without_staking_contract_submits_nothing() {
        let h = harness(true, U256::from(100), false);
        let (status, seen) = recorder();

        assert!(!h.controller.stake(status.clone()).await.is_successful);
        assert!(!h.controller.claim(status.clone()).await.is_successful);
        assert!(!h.controller.unstake(status.clone()).await.is_successful);
        assert!(!h.controller.approve(status).await.is_successful);

        assert!(h.actions.calls.borrow().is_empty());
        assert!(seen.borrow().is_empty());
    }
}
