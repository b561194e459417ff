pub mod abi;
pub mod amount;
pub mod transaction;

/// EVM chain identifier (EIP-155)
pub type ChainId = u64;
