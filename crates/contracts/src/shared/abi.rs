//! Solidity bindings for the ERC-20 and StakingRewards calls used by the
//! rewards panel.

use alloy_primitives::{hex, Address, U256};
use alloy_sol_types::{sol, SolCall};
use thiserror::Error;

sol! {
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
    }

    interface IStakingRewards {
        function stake(uint256 amount) external;
        function getReward() external;
        // withdraws the full stake and claims pending rewards
        function exit() external;
        function balanceOf(address account) external view returns (uint256);
        function earned(address account) external view returns (uint256);
    }
}

#[derive(Debug, Error)]
pub enum AbiError {
    #[error("invalid return data: {0}")]
    Decode(#[from] alloy_sol_types::Error),
    #[error("invalid quantity '{0}'")]
    Quantity(String),
    #[error("string data is not valid UTF-8")]
    Utf8,
}

/// `0x`-prefixed calldata for any bound call
pub fn calldata<C: SolCall>(call: &C) -> String {
    hex::encode_prefixed(call.abi_encode())
}

/// Decode the return data of a bound call
pub fn decode_returns<C: SolCall>(data: &[u8]) -> Result<C::Return, AbiError> {
    Ok(C::abi_decode_returns(data, true)?)
}

pub fn approve_calldata(spender: Address, amount: U256) -> String {
    calldata(&IERC20::approveCall { spender, amount })
}

pub fn stake_calldata(amount: U256) -> String {
    calldata(&IStakingRewards::stakeCall { amount })
}

pub fn get_reward_calldata() -> String {
    calldata(&IStakingRewards::getRewardCall {})
}

pub fn exit_calldata() -> String {
    calldata(&IStakingRewards::exitCall {})
}

/// Decode a `symbol()` return value.
///
/// Some older tokens return `bytes32`; a bare 32-byte payload is read as a
/// NUL-padded string.
pub fn decode_symbol(data: &[u8]) -> Result<String, AbiError> {
    if data.len() == 32 {
        let end = data.iter().position(|b| *b == 0).unwrap_or(data.len());
        return String::from_utf8(data[..end].to_vec()).map_err(|_| AbiError::Utf8);
    }
    Ok(decode_returns::<IERC20::symbolCall>(data)?._0)
}

/// Parse a JSON-RPC hex quantity such as `"0xa"`
pub fn parse_quantity(s: &str) -> Result<u64, AbiError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16).map_err(|_| AbiError::Quantity(s.to_string()))
}
