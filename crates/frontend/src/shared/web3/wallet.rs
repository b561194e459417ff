use alloy_primitives::Address;
use contracts::shared::ChainId;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::provider::Eip1193Provider;

/// Connected wallet account, as exposed by the injected provider
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub address: RwSignal<Option<Address>>,
    pub chain_id: RwSignal<Option<ChainId>>,
}

impl WalletContext {
    pub fn new() -> Self {
        Self {
            address: RwSignal::new(None),
            chain_id: RwSignal::new(None),
        }
    }

    pub fn provider(&self) -> Option<Eip1193Provider> {
        Eip1193Provider::detect()
    }

    /// A wallet account is available to sign transactions
    pub fn is_active(&self) -> bool {
        self.address.get().is_some()
    }

    /// Read the account and chain the provider already exposes
    pub fn sync(&self) {
        let Some(provider) = self.provider() else {
            log::info!("No injected wallet provider found");
            return;
        };
        let address = self.address;
        let chain_id = self.chain_id;
        spawn_local(async move {
            match provider.accounts().await {
                Ok(accounts) => address.set(accounts.first().copied()),
                Err(e) => log::warn!("Failed to read wallet accounts: {}", e),
            }
            match provider.chain_id().await {
                Ok(id) => chain_id.set(Some(id)),
                Err(e) => log::warn!("Failed to read wallet chain: {}", e),
            }
        });
    }
}

impl Default for WalletContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook to access the wallet context
pub fn use_wallet() -> WalletContext {
    use_context::<WalletContext>().expect("WalletContext not found in component tree")
}
