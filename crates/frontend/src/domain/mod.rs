pub mod a001_vault_rewards;
