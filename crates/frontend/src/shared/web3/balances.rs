use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use contracts::domain::a003_token::TokenBalance;
use contracts::shared::amount::TokenAmount;
use contracts::shared::ChainId;
use gloo_net::http::Request;
use leptos::prelude::*;
use serde_json::Value;

use super::reader::ChainReader;
use super::wallet::WalletContext;
use crate::shared::services::BalanceStore;

/// Token metadata, fetched once per token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub symbol: String,
    pub decimals: u8,
}

/// Parse a price map; values may be JSON numbers or numeric strings.
/// Keys that are not addresses and values that are not numbers are skipped.
pub fn parse_prices(raw: HashMap<String, Value>) -> HashMap<Address, f64> {
    raw.into_iter()
        .filter_map(|(key, value)| {
            let address = key.parse::<Address>().ok()?;
            let price = match value {
                Value::Number(n) => n.as_f64()?,
                Value::String(s) => s.parse::<f64>().ok()?,
                _ => return None,
            };
            Some((address, price))
        })
        .collect()
}

async fn fetch_prices(url: &str) -> Result<HashMap<Address, f64>, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Failed to fetch prices: {}", e))?;

    if !response.ok() {
        return Err(format!("Prices request failed: HTTP {}", response.status()));
    }

    let raw = response
        .json::<HashMap<String, Value>>()
        .await
        .map_err(|e| format!("Failed to parse prices: {}", e))?;
    Ok(parse_prices(raw))
}

/// Balances of the tracked tokens for the connected wallet
#[derive(Clone)]
pub struct BalancesContext {
    reader: Rc<ChainReader>,
    wallet: WalletContext,
    tokens: Rc<Vec<Address>>,
    prices_url: Option<String>,
    metadata: Rc<RefCell<HashMap<Address, TokenMetadata>>>,
    balances: RwSignal<HashMap<(Address, ChainId), TokenBalance>>,
}

impl BalancesContext {
    /// `known` seeds metadata for tokens described by configuration
    pub fn new(
        reader: Rc<ChainReader>,
        wallet: WalletContext,
        tokens: Vec<Address>,
        known: Vec<(Address, TokenMetadata)>,
        prices_url: Option<String>,
    ) -> Self {
        Self {
            reader,
            wallet,
            tokens: Rc::new(tokens),
            prices_url,
            metadata: Rc::new(RefCell::new(known.into_iter().collect())),
            balances: RwSignal::new(HashMap::new()),
        }
    }

    async fn metadata(&self, token: Address) -> Result<TokenMetadata, String> {
        if let Some(known) = self.metadata.borrow().get(&token) {
            return Ok(known.clone());
        }
        let decimals = self.reader.decimals(token).await?;
        let symbol = self.reader.symbol(token).await.unwrap_or_else(|e| {
            log::warn!("{}", e);
            String::new()
        });
        let metadata = TokenMetadata { symbol, decimals };
        self.metadata.borrow_mut().insert(token, metadata.clone());
        Ok(metadata)
    }

    async fn load(
        &self,
        token: Address,
        owner: Option<Address>,
        prices: &HashMap<Address, f64>,
    ) -> Result<TokenBalance, String> {
        let chain_id = self.reader.chain_id();
        let metadata = self.metadata(token).await?;
        let raw = match owner {
            Some(owner) => self.reader.balance_of(token, owner).await?,
            None => U256::ZERO,
        };
        Ok(TokenBalance {
            address: token,
            chain_id,
            symbol: metadata.symbol,
            decimals: metadata.decimals,
            balance: TokenAmount::new(raw, metadata.decimals),
            price: prices.get(&token).copied().unwrap_or(0.0),
        })
    }
}

#[async_trait(?Send)]
impl BalanceStore for BalancesContext {
    fn token(&self, address: Address, chain_id: ChainId) -> TokenBalance {
        self.balances
            .with(|map| map.get(&(address, chain_id)).cloned())
            .unwrap_or_else(|| TokenBalance::empty(address, chain_id))
    }

    async fn refresh(&self) {
        let owner = self.wallet.address.get_untracked();
        let prices = match &self.prices_url {
            Some(url) => fetch_prices(url).await.unwrap_or_else(|e| {
                log::warn!("{}", e);
                HashMap::new()
            }),
            None => HashMap::new(),
        };

        let mut loaded = HashMap::new();
        for token in self.tokens.iter().copied() {
            match self.load(token, owner, &prices).await {
                Ok(balance) => {
                    loaded.insert((token, balance.chain_id), balance);
                }
                Err(e) => log::warn!("Failed to refresh balance of {}: {}", token, e),
            }
        }

        self.balances.set(loaded);
    }
}
