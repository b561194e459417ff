use std::rc::Rc;

use alloy_primitives::{Address, U256};
use contracts::domain::a001_vault::VaultDescriptor;
use contracts::domain::a002_staking_rewards::StakingPosition;
use contracts::domain::a003_token::aggregate::DEFAULT_DECIMALS;
use contracts::domain::a003_token::TokenBalance;
use contracts::shared::amount::TokenAmount;
use contracts::shared::transaction::TxStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::controller::RewardsController;
use super::model::{ButtonState, PanelSnapshot};
use crate::config::DisplaySettings;
use crate::shared::number_format::format_counter_value;
use crate::shared::services::{AllowanceQuery, RewardsServices, StatusHandler};
use crate::shared::web3::WalletContext;

/// Allowance query backed by a local resource
struct ResourceAllowance(LocalResource<Option<U256>>);

impl AllowanceQuery for ResourceAllowance {
    fn refetch(&self) {
        self.0.refetch();
    }
}

/// Status writer that ignores updates once the panel is unmounted
fn status_handler(signal: RwSignal<TxStatus>) -> StatusHandler {
    Rc::new(move |status: TxStatus| {
        if signal.try_set(status).is_some() {
            log::debug!("Dropped status {:?} for an unmounted rewards panel", status);
        }
    })
}

/// Folds the allowance resource into a snapshot. The resource is `None`
/// while the query runs and `Some(None)` when it has no owner or spender or
/// the read failed.
fn with_allowance(mut snapshot: PanelSnapshot, resource: Option<Option<U256>>) -> PanelSnapshot {
    snapshot.allowance_loading = resource.is_none();
    snapshot.allowance = resource.flatten();
    snapshot
}

/// ViewModel for the vault rewards tab
///
/// All fields are arena handles, so the ViewModel is `Copy` and can be moved
/// into any number of view closures. Services live in local storage because
/// they are `Rc`-based.
#[derive(Clone, Copy)]
pub struct RewardsTabViewModel {
    pub vault: StoredValue<VaultDescriptor>,
    pub display: StoredValue<DisplaySettings>,
    pub wallet: WalletContext,
    pub approve_status: RwSignal<TxStatus>,
    pub stake_status: RwSignal<TxStatus>,
    pub claim_status: RwSignal<TxStatus>,
    pub unstake_status: RwSignal<TxStatus>,
    pub allowance: LocalResource<Option<U256>>,
    services: StoredValue<RewardsServices, LocalStorage>,
    controller: StoredValue<Rc<RewardsController>, LocalStorage>,
}

impl RewardsTabViewModel {
    pub fn new(
        vault: VaultDescriptor,
        wallet: WalletContext,
        services: RewardsServices,
        display: DisplaySettings,
    ) -> Self {
        let allowance = {
            let reader = services.allowance.clone();
            let staking = services.staking.clone();
            let vault = vault.clone();
            LocalResource::new(move || {
                let reader = reader.clone();
                let owner = wallet.address.get();
                let spender = staking
                    .staking_for_vault(vault.address)
                    .filter(|s| !s.is_zero());
                let chain_id = vault.chain_id;
                let token = vault.address;
                async move {
                    let (owner, spender) = (owner?, spender?);
                    match reader.allowance(chain_id, token, owner, spender).await {
                        Ok(value) => Some(value),
                        Err(e) => {
                            log::warn!("Failed to read allowance: {}", e);
                            None
                        }
                    }
                }
            })
        };

        let controller = RewardsController::new(
            vault.clone(),
            services.actions.clone(),
            services.balances.clone(),
            services.staking.clone(),
            Rc::new(ResourceAllowance(allowance)),
        );

        Self {
            vault: StoredValue::new(vault),
            display: StoredValue::new(display),
            wallet,
            approve_status: RwSignal::new(TxStatus::Idle),
            stake_status: RwSignal::new(TxStatus::Idle),
            claim_status: RwSignal::new(TxStatus::Idle),
            unstake_status: RwSignal::new(TxStatus::Idle),
            allowance,
            services: StoredValue::new_local(services),
            controller: StoredValue::new_local(Rc::new(controller)),
        }
    }

    pub fn staking_address(&self) -> Option<Address> {
        let vault = self.vault.with_value(|v| v.address);
        self.services
            .with_value(|s| s.staking.staking_for_vault(vault))
    }

    fn vault_token(&self) -> TokenBalance {
        let (address, chain_id) = self.vault.with_value(|v| (v.address, v.chain_id));
        self.services
            .with_value(|s| s.balances.token(address, chain_id))
    }

    /// Reward token balance record; `None` until the staking metadata is known
    fn reward_token(&self) -> Option<TokenBalance> {
        let staking = self.staking_address()?;
        let chain_id = self.vault.with_value(|v| v.chain_id);
        self.services.with_value(|s| {
            s.staking
                .rewards(staking)
                .map(|info| s.balances.token(info.rewards_token, chain_id))
        })
    }

    fn position(&self) -> StakingPosition {
        self.staking_address()
            .and_then(|staking| self.services.with_value(|s| s.staking.position(staking)))
            .unwrap_or_default()
    }

    fn staked_amount(&self) -> TokenAmount {
        let decimals = self.vault.with_value(|v| v.decimals);
        TokenAmount::new(self.position().stake, decimals)
    }

    fn reward_amount(&self) -> TokenAmount {
        let decimals = self
            .reward_token()
            .map(|t| t.decimals)
            .unwrap_or(DEFAULT_DECIMALS);
        TokenAmount::new(self.position().reward, decimals)
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        let snapshot = PanelSnapshot {
            wallet_active: self.wallet.is_active(),
            vault_balance: self.vault_token().balance,
            staked: self.staked_amount(),
            reward: self.reward_amount(),
            approve_status: self.approve_status.get(),
            stake_status: self.stake_status.get(),
            claim_status: self.claim_status.get(),
            unstake_status: self.unstake_status.get(),
            ..Default::default()
        };
        with_allowance(snapshot, self.allowance.get())
    }

    pub fn stake_button(&self) -> ButtonState {
        self.snapshot().stake_button()
    }

    pub fn claim_button(&self) -> ButtonState {
        self.snapshot().claim_button()
    }

    pub fn unstake_button(&self) -> ButtonState {
        self.snapshot().unstake_button()
    }

    fn trimmed(&self, amount: &TokenAmount) -> String {
        amount.display(self.display.with_value(|d| d.decimals))
    }

    pub fn unstaked_value(&self) -> String {
        let symbol = self.vault.with_value(|v| v.symbol.clone());
        format!("{} {}", self.trimmed(&self.vault_token().balance), symbol)
    }

    pub fn unstaked_legend(&self) -> String {
        let token = self.vault_token();
        format_counter_value(token.balance.normalized_f64(), token.price)
    }

    pub fn unclaimed_value(&self) -> String {
        let symbol = self
            .reward_token()
            .map(|t| t.symbol)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.display.with_value(|d| d.reward_symbol_fallback.clone()));
        format!("{} {}", self.trimmed(&self.reward_amount()), symbol)
    }

    pub fn unclaimed_legend(&self) -> String {
        let price = self.reward_token().map(|t| t.price).unwrap_or(0.0);
        format_counter_value(self.reward_amount().normalized_f64(), price)
    }

    pub fn staked_value(&self) -> String {
        let symbol = self.vault.with_value(|v| v.symbol.clone());
        format!("{} {}", self.trimmed(&self.staked_amount()), symbol)
    }

    pub fn staked_legend(&self) -> String {
        format_counter_value(self.staked_amount().normalized_f64(), self.vault_token().price)
    }

    /// Stake button click: approves when the allowance is short, stakes otherwise
    pub fn stake_command(&self) {
        let is_approved = self.snapshot_untracked().is_approved();
        let controller = self.controller.get_value();
        let approve = status_handler(self.approve_status);
        let stake = status_handler(self.stake_status);
        spawn_local(async move {
            controller.stake_or_approve(is_approved, approve, stake).await;
        });
    }

    pub fn claim_command(&self) {
        let controller = self.controller.get_value();
        let status = status_handler(self.claim_status);
        spawn_local(async move {
            controller.claim(status).await;
        });
    }

    pub fn unstake_command(&self) {
        let controller = self.controller.get_value();
        let status = status_handler(self.unstake_status);
        spawn_local(async move {
            controller.unstake(status).await;
        });
    }

    fn snapshot_untracked(&self) -> PanelSnapshot {
        untrack(|| self.snapshot())
    }
}
