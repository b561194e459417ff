use std::collections::HashMap;
use std::rc::Rc;

use alloy_primitives::Address;
use async_trait::async_trait;
use contracts::domain::a002_staking_rewards::{StakingPosition, StakingRewardsInfo};
use leptos::prelude::*;

use super::reader::ChainReader;
use super::wallet::WalletContext;
use crate::shared::services::StakingRewardsStore;

/// Replace `positions` with the successful loads of one refresh.
///
/// A contract whose load failed is left without a position instead of
/// keeping values read for a previous account.
fn apply_loaded(
    positions: &mut HashMap<Address, StakingPosition>,
    loaded: Vec<(Address, Result<StakingPosition, String>)>,
) {
    positions.clear();
    for (staking, result) in loaded {
        match result {
            Ok(position) => {
                positions.insert(staking, position);
            }
            Err(e) => log::warn!("Failed to refresh staking position in {}: {}", staking, e),
        }
    }
}

/// Staking contract registry plus the connected wallet's positions
#[derive(Clone)]
pub struct StakingRewardsContext {
    reader: Rc<ChainReader>,
    wallet: WalletContext,
    registry: Rc<Vec<StakingRewardsInfo>>,
    positions: RwSignal<HashMap<Address, StakingPosition>>,
}

impl StakingRewardsContext {
    pub fn new(
        reader: Rc<ChainReader>,
        wallet: WalletContext,
        registry: Vec<StakingRewardsInfo>,
    ) -> Self {
        Self {
            reader,
            wallet,
            registry: Rc::new(registry),
            positions: RwSignal::new(HashMap::new()),
        }
    }

    async fn load(&self, staking: Address, owner: Address) -> Result<StakingPosition, String> {
        let (stake, reward) = futures::join!(
            self.reader.staked(staking, owner),
            self.reader.earned(staking, owner)
        );
        Ok(StakingPosition {
            stake: stake?,
            reward: reward?,
        })
    }
}

#[async_trait(?Send)]
impl StakingRewardsStore for StakingRewardsContext {
    fn staking_for_vault(&self, vault: Address) -> Option<Address> {
        self.registry
            .iter()
            .find(|info| info.vault == vault)
            .map(|info| info.address)
    }

    fn rewards(&self, staking: Address) -> Option<StakingRewardsInfo> {
        self.registry
            .iter()
            .find(|info| info.address == staking)
            .cloned()
    }

    fn position(&self, staking: Address) -> Option<StakingPosition> {
        self.positions.with(|map| map.get(&staking).copied())
    }

    async fn refresh(&self) {
        let Some(owner) = self.wallet.address.get_untracked() else {
            self.positions.set(HashMap::new());
            return;
        };

        let mut loaded = Vec::new();
        for info in self.registry.iter() {
            if info.chain_id != self.reader.chain_id() {
                continue;
            }
            loaded.push((info.address, self.load(info.address, owner).await));
        }

        self.positions.update(|map| apply_loaded(map, loaded));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    fn position(stake: u64, reward: u64) -> StakingPosition {
        StakingPosition {
            stake: U256::from(stake),
            reward: U256::from(reward),
        }
    }

    #[test]
    fn test_failed_load_drops_previous_account_position() {
        let first = Address::repeat_byte(0x01);
        let second = Address::repeat_byte(0x02);
        let mut positions = HashMap::from([(first, position(100, 7)), (second, position(5, 1))]);

        apply_loaded(
            &mut positions,
            vec![
                (first, Err("execution reverted".to_string())),
                (second, Ok(position(40, 2))),
            ],
        );

        assert_eq!(positions.get(&first), None);
        assert_eq!(positions.get(&second), Some(&position(40, 2)));
    }

    #[test]
    fn test_successful_refresh_replaces_every_position() {
        let staking = Address::repeat_byte(0x03);
        let mut positions = HashMap::from([(staking, position(100, 7))]);

        apply_loaded(&mut positions, vec![(staking, Ok(position(0, 0)))]);

        assert_eq!(positions.len(), 1);
        assert_eq!(positions[&staking], StakingPosition::default());
    }
}
