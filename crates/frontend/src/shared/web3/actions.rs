use alloy_primitives::U256;
use async_trait::async_trait;
use contracts::shared::abi;
use contracts::shared::transaction::{ActionRequest, TxKind, TxResult, TxStatus};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::GetUntracked;

use super::provider::{Eip1193Provider, TransactionRequest};
use super::wallet::WalletContext;
use crate::config::TransactionSettings;
use crate::shared::services::{StatusHandler, TransactionActions};

/// Calldata for one action against `request.contract`
pub fn calldata_for(kind: TxKind, request: &ActionRequest) -> Result<String, String> {
    match kind {
        TxKind::Approve => {
            let spender = request.spender.ok_or("approve requires a spender")?;
            let amount = request.amount.ok_or("approve requires an amount")?;
            Ok(abi::approve_calldata(spender, amount))
        }
        TxKind::Stake => {
            let amount = request.amount.ok_or("stake requires an amount")?;
            Ok(abi::stake_calldata(amount))
        }
        TxKind::Claim => Ok(abi::get_reward_calldata()),
        TxKind::Unstake => Ok(abi::exit_calldata()),
    }
}

/// Submits transactions through the injected wallet and waits for receipts
pub struct WalletActions {
    wallet: WalletContext,
    settings: TransactionSettings,
}

impl WalletActions {
    pub fn new(wallet: WalletContext, settings: TransactionSettings) -> Self {
        Self { wallet, settings }
    }

    async fn submit(
        &self,
        kind: TxKind,
        request: ActionRequest,
        status: StatusHandler,
    ) -> TxResult {
        status(TxStatus::Pending);
        match self.send_and_confirm(kind, &request).await {
            Ok(true) => {
                log::info!("{} on {} confirmed", kind.label(), request.contract);
                status(TxStatus::Succeeded);
                TxResult::success()
            }
            Ok(false) => {
                log::warn!("{} on {} reverted", kind.label(), request.contract);
                status(TxStatus::Failed);
                TxResult::failure()
            }
            Err(e) => {
                log::error!("{} on {} failed: {}", kind.label(), request.contract, e);
                status(TxStatus::Failed);
                TxResult::failure()
            }
        }
    }

    async fn send_and_confirm(&self, kind: TxKind, request: &ActionRequest) -> Result<bool, String> {
        let data = calldata_for(kind, request)?;
        let provider = self
            .wallet
            .provider()
            .ok_or("No injected wallet provider")?;
        let from = self
            .wallet
            .address
            .get_untracked()
            .ok_or("Wallet is not connected")?;

        let chain_id = provider.chain_id().await?;
        if chain_id != request.chain_id {
            return Err(format!(
                "wallet is on chain {}, expected {}",
                chain_id, request.chain_id
            ));
        }

        let tx = TransactionRequest {
            from,
            to: request.contract,
            data,
        };
        let hash = provider.send_transaction(&tx).await?;
        log::info!("{} submitted: {}", kind.label(), hash);

        self.wait_for_receipt(&provider, &hash).await
    }

    async fn wait_for_receipt(&self, provider: &Eip1193Provider, hash: &str) -> Result<bool, String> {
        let poll_ms = self.settings.receipt_poll_ms.max(1);
        let mut waited_ms: u32 = 0;
        loop {
            if let Some(succeeded) = provider.transaction_receipt(hash).await? {
                return Ok(succeeded);
            }
            if waited_ms >= self.settings.receipt_timeout_ms {
                return Err(format!("no receipt for {} after {} ms", hash, waited_ms));
            }
            TimeoutFuture::new(poll_ms).await;
            waited_ms = waited_ms.saturating_add(poll_ms);
        }
    }
}

#[async_trait(?Send)]
impl TransactionActions for WalletActions {
    async fn approve(&self, request: ActionRequest, status: StatusHandler) -> TxResult {
        self.submit(TxKind::Approve, request, status).await
    }

    async fn stake(&self, request: ActionRequest, status: StatusHandler) -> TxResult {
        self.submit(TxKind::Stake, request, status).await
    }

    async fn unstake(&self, request: ActionRequest, status: StatusHandler) -> TxResult {
        self.submit(TxKind::Unstake, request, status).await
    }

    async fn claim(&self, request: ActionRequest, status: StatusHandler) -> TxResult {
        self.submit(TxKind::Claim, request, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;

    fn request(amount: Option<U256>, spender: Option<Address>) -> ActionRequest {
        ActionRequest {
            chain_id: 10,
            contract: Address::ZERO,
            amount,
            spender,
        }
    }

    #[test]
    fn test_calldata_requires_amount_and_spender() {
        let spender = Address::repeat_byte(0x11);
        let hundred = U256::from(100);
        assert!(calldata_for(TxKind::Approve, &request(Some(hundred), None)).is_err());
        assert!(calldata_for(TxKind::Approve, &request(None, Some(spender))).is_err());
        assert!(calldata_for(TxKind::Stake, &request(None, None)).is_err());

        let approve =
            calldata_for(TxKind::Approve, &request(Some(hundred), Some(spender))).unwrap();
        assert_eq!(approve, abi::approve_calldata(spender, hundred));
    }

    #[test]
    fn test_calldata_selectors_per_kind() {
        let stake = calldata_for(TxKind::Stake, &request(Some(U256::from(100)), None)).unwrap();
        assert!(stake.starts_with("0xa694fc3a"));
        assert_eq!(
            calldata_for(TxKind::Claim, &request(None, None)).unwrap(),
            "0x3d18b912"
        );
        assert_eq!(
            calldata_for(TxKind::Unstake, &request(None, None)).unwrap(),
            "0xe9fad8ee"
        );
    }
}
