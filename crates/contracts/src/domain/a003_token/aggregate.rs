use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::shared::amount::TokenAmount;
use crate::shared::ChainId;

/// Decimals assumed for a token whose metadata has not been fetched yet
pub const DEFAULT_DECIMALS: u8 = 18;

/// Connected user's balance of one token, with its USD price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub address: Address,
    pub chain_id: ChainId,
    pub symbol: String,
    pub decimals: u8,
    pub balance: TokenAmount,
    pub price: f64,
}

impl TokenBalance {
    /// Zero balance placeholder for a token not loaded yet
    pub fn empty(address: Address, chain_id: ChainId) -> Self {
        Self {
            address,
            chain_id,
            symbol: String::new(),
            decimals: DEFAULT_DECIMALS,
            balance: TokenAmount::new(U256::ZERO, DEFAULT_DECIMALS),
            price: 0.0,
        }
    }
}
