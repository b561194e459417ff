use alloy_primitives::{hex, Address, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use contracts::shared::abi::{self, IStakingRewards, IERC20};
use contracts::shared::ChainId;
use serde_json::json;

use super::rpc::RpcClient;
use crate::shared::services::AllowanceReader;

/// Read-only contract calls against the configured RPC node
pub struct ChainReader {
    rpc: RpcClient,
    chain_id: ChainId,
}

impl ChainReader {
    pub fn new(rpc: RpcClient, chain_id: ChainId) -> Self {
        Self { rpc, chain_id }
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    fn ensure_chain(&self, chain_id: ChainId) -> Result<(), String> {
        if chain_id != self.chain_id {
            return Err(format!(
                "RPC {} serves chain {}, requested {}",
                self.rpc.url(),
                self.chain_id,
                chain_id
            ));
        }
        Ok(())
    }

    async fn call(&self, to: Address, data: String) -> Result<Vec<u8>, String> {
        let result = self
            .rpc
            .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        let encoded = result
            .as_str()
            .ok_or_else(|| format!("Unexpected eth_call result: {}", result))?;
        hex::decode(encoded).map_err(|e| format!("Invalid eth_call result: {}", e))
    }

    /// `eth_call` a bound function and decode its return values
    async fn read<C: SolCall>(&self, to: Address, call: C) -> Result<C::Return, String> {
        let data = self.call(to, abi::calldata(&call)).await?;
        abi::decode_returns::<C>(&data).map_err(|e| format!("{} on {}: {}", C::SIGNATURE, to, e))
    }

    pub async fn balance_of(&self, token: Address, owner: Address) -> Result<U256, String> {
        Ok(self
            .read(token, IERC20::balanceOfCall { account: owner })
            .await?
            ._0)
    }

    pub async fn decimals(&self, token: Address) -> Result<u8, String> {
        Ok(self.read(token, IERC20::decimalsCall {}).await?._0)
    }

    pub async fn symbol(&self, token: Address) -> Result<String, String> {
        let data = self
            .call(token, abi::calldata(&IERC20::symbolCall {}))
            .await?;
        abi::decode_symbol(&data).map_err(|e| format!("symbol() on {}: {}", token, e))
    }

    /// Stake held by `account` in a StakingRewards contract
    pub async fn staked(&self, staking: Address, account: Address) -> Result<U256, String> {
        Ok(self
            .read(staking, IStakingRewards::balanceOfCall { account })
            .await?
            ._0)
    }

    /// Rewards accrued by `account` and not yet claimed
    pub async fn earned(&self, staking: Address, account: Address) -> Result<U256, String> {
        Ok(self
            .read(staking, IStakingRewards::earnedCall { account })
            .await?
            ._0)
    }
}

#[async_trait(?Send)]
impl AllowanceReader for ChainReader {
    async fn allowance(
        &self,
        chain_id: ChainId,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, String> {
        self.ensure_chain(chain_id)?;
        Ok(self
            .read(token, IERC20::allowanceCall { owner, spender })
            .await?
            ._0)
    }
}
