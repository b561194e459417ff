use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::{load_config, AppConfig};
use crate::domain::a001_vault_rewards::ui::rewards_tab::RewardsTab;
use crate::shared::services::{BalanceStore, RewardsServices, StakingRewardsStore};
use crate::shared::web3::balances::TokenMetadata;
use crate::shared::web3::wallet::use_wallet;
use crate::shared::web3::{
    BalancesContext, ChainReader, RpcClient, StakingRewardsContext, WalletActions, WalletContext,
};

#[component]
pub fn App() -> impl IntoView {
    let config = LocalResource::new(load_config);

    view! {
        {move || match config.get() {
            None => view! { <div class="page-loading">"Loading configuration..."</div> }.into_any(),
            Some(Err(e)) => view! { <div class="warning-box text-error">{e}</div> }.into_any(),
            Some(Ok(cfg)) => view! { <VaultPage config=cfg /> }.into_any(),
        }}
    }
}

#[component]
fn WalletBadge() -> impl IntoView {
    let wallet = use_wallet();

    view! {
        <div class="wallet-badge">
            {move || match wallet.address.get() {
                Some(address) => address.to_string(),
                None => "Wallet not connected".to_string(),
            }}
        </div>
    }
}

/// Wires the web3 services for the configured vault and renders its rewards tab
#[component]
fn VaultPage(config: AppConfig) -> impl IntoView {
    let wallet = WalletContext::new();
    provide_context(wallet);
    wallet.sync();

    let reader = Rc::new(ChainReader::new(
        RpcClient::new(config.rpc.url.clone()),
        config.rpc.chain_id,
    ));

    let mut tokens = vec![config.vault.address];
    tokens.extend(config.staking_rewards.iter().map(|s| s.rewards_token));
    let known = vec![(
        config.vault.address,
        TokenMetadata {
            symbol: config.vault.symbol.clone(),
            decimals: config.vault.decimals,
        },
    )];

    let balances = Rc::new(BalancesContext::new(
        reader.clone(),
        wallet,
        tokens,
        known,
        config.prices_url.clone(),
    ));
    let staking = Rc::new(StakingRewardsContext::new(
        reader.clone(),
        wallet,
        config.staking_rewards.clone(),
    ));
    let actions = Rc::new(WalletActions::new(wallet, config.transactions.clone()));

    // Reload balances and positions whenever the connected account changes
    {
        let balances = balances.clone();
        let staking = staking.clone();
        Effect::new(move |_| {
            wallet.address.track();
            let balances = balances.clone();
            let staking = staking.clone();
            spawn_local(async move {
                futures::join!(balances.refresh(), staking.refresh());
            });
        });
    }

    let services = RewardsServices {
        actions,
        balances,
        staking,
        allowance: reader,
    };

    view! {
        <div class="vault-page">
            <header class="vault-page__header">
                <h1>{config.vault.symbol.clone()}</h1>
                <WalletBadge />
            </header>
            <RewardsTab
                vault=config.vault.clone()
                wallet=wallet
                services=services
                display=config.display.clone()
            />
        </div>
    }
}
