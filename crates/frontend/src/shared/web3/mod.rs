//! Web3 adapters behind the services in `shared::services`
//!
//! - rpc.rs: JSON-RPC over HTTP for reads
//! - provider.rs: injected EIP-1193 wallet provider for writes
//! - reader.rs: typed contract reads
//! - actions.rs: transaction submission and receipt polling
//! - balances.rs / staking_rewards.rs: signal-backed stores
//! - wallet.rs: connected account context

pub mod actions;
pub mod balances;
pub mod provider;
pub mod reader;
pub mod rpc;
pub mod staking_rewards;
pub mod wallet;

pub use actions::WalletActions;
pub use balances::BalancesContext;
pub use provider::Eip1193Provider;
pub use reader::ChainReader;
pub use rpc::RpcClient;
pub use staking_rewards::StakingRewardsContext;
pub use wallet::WalletContext;
