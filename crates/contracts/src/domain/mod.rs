pub mod a001_vault;
pub mod a002_staking_rewards;
pub mod a003_token;
