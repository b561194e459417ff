use contracts::domain::a001_vault::VaultDescriptor;
use leptos::prelude::*;

use super::view_model::RewardsTabViewModel;
use crate::config::DisplaySettings;
use crate::shared::components::ui::{Button, Input};
use crate::shared::services::RewardsServices;
use crate::shared::web3::WalletContext;

#[component]
fn RewardsSection(
    title: &'static str,
    hint: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="rewards-tab__section">
            <div>
                <div class="rewards-tab__title">{title}</div>
                <div class="rewards-tab__hint">
                    <p>{hint}</p>
                </div>
            </div>
            <div class="rewards-tab__row">
                {children()}
            </div>
        </div>
    }
}

/// Stake / Claim / Unstake panel for one vault
#[component]
pub fn RewardsTab(
    vault: VaultDescriptor,
    wallet: WalletContext,
    services: RewardsServices,
    #[prop(optional)] display: Option<DisplaySettings>,
) -> impl IntoView {
    let vm = RewardsTabViewModel::new(vault, wallet, services, display.unwrap_or_default());

    if vm.staking_address().is_none() {
        return view! {
            <div class="rewards-tab">
                <div class="info-box">"This vault has no staking rewards."</div>
            </div>
        }
        .into_any();
    }

    view! {
        <div class="rewards-tab">
            <RewardsSection
                title="Stake"
                hint="Stake your yVault tokens for additional $OP rewards."
            >
                <Input
                    class="rewards-tab__amount"
                    label="You have unstaked"
                    value=Signal::derive(move || vm.unstaked_value())
                    legend=Signal::derive(move || vm.unstaked_legend())
                    disabled=true
                />
                <Button
                    class="rewards-tab__action"
                    on_click=Callback::new(move |_| vm.stake_command())
                    busy=Signal::derive(move || vm.stake_button().busy)
                    disabled=Signal::derive(move || vm.stake_button().disabled)
                >
                    {move || vm.stake_button().label}
                </Button>
            </RewardsSection>

            <RewardsSection
                title="Claim"
                hint="Claim your staking rewards here. You've earned it anon."
            >
                <Input
                    class="rewards-tab__amount"
                    label="You have unclaimed"
                    value=Signal::derive(move || vm.unclaimed_value())
                    legend=Signal::derive(move || vm.unclaimed_legend())
                    disabled=true
                />
                <Button
                    class="rewards-tab__action"
                    on_click=Callback::new(move |_| vm.claim_command())
                    busy=Signal::derive(move || vm.claim_button().busy)
                    disabled=Signal::derive(move || vm.claim_button().disabled)
                >
                    {move || vm.claim_button().label}
                </Button>
            </RewardsSection>

            <RewardsSection
                title="Unstake"
                hint="Unstake your yVault tokens and your remaining $OP rewards will be claimed automatically. Boom."
            >
                <Input
                    class="rewards-tab__amount"
                    label="You have staked"
                    value=Signal::derive(move || vm.staked_value())
                    legend=Signal::derive(move || vm.staked_legend())
                    disabled=true
                />
                <Button
                    class="rewards-tab__action"
                    on_click=Callback::new(move |_| vm.unstake_command())
                    busy=Signal::derive(move || vm.unstake_button().busy)
                    disabled=Signal::derive(move || vm.unstake_button().disabled)
                >
                    {move || vm.unstake_button().label}
                </Button>
            </RewardsSection>
        </div>
    }
    .into_any()
}
