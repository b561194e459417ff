use contracts::domain::a001_vault::VaultDescriptor;
use contracts::domain::a002_staking_rewards::StakingRewardsInfo;
use contracts::shared::amount::DISPLAY_DECIMALS;
use contracts::shared::ChainId;
use gloo_net::http::Request;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Optional endpoint returning `{ "<token address>": <usd price>, ... }`
    #[serde(default)]
    pub prices_url: Option<String>,
    pub rpc: RpcConfig,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub transactions: TransactionSettings,
    pub vault: VaultDescriptor,
    #[serde(default)]
    pub staking_rewards: Vec<StakingRewardsInfo>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RpcConfig {
    pub url: String,
    pub chain_id: ChainId,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum fractional digits shown for token amounts
    pub decimals: u8,
    pub reward_symbol_fallback: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            decimals: DISPLAY_DECIMALS,
            reward_symbol_fallback: "yvOP".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TransactionSettings {
    pub receipt_poll_ms: u32,
    pub receipt_timeout_ms: u32,
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self {
            receipt_poll_ms: 2_000,
            receipt_timeout_ms: 300_000,
        }
    }
}

/// Default configuration embedded in the bundle.
///
/// Points at a local development node with the first three contracts deployed
/// by the default dev account: vault token, rewards token, staking contract.
const DEFAULT_CONFIG: &str = r#"
[rpc]
url = "http://127.0.0.1:8545"
chain_id = 31337

[display]
decimals = 10
reward_symbol_fallback = "yvOP"

[transactions]
receipt_poll_ms = 2000
receipt_timeout_ms = 300000

[vault]
address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
chain_id = 31337
decimals = 18
symbol = "yvUSDC"

[[staking_rewards]]
address = "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6E0"
vault = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
rewards_token = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
chain_id = 31337
"#;

/// Path of the optional override, relative to the page
const CONFIG_PATH: &str = "/config.toml";

pub fn parse_config(contents: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    if config.vault.address.is_zero() {
        anyhow::bail!("vault.address must not be the zero address");
    }
    if config.vault.chain_id != config.rpc.chain_id {
        anyhow::bail!(
            "vault.chain_id {} does not match rpc.chain_id {}",
            config.vault.chain_id,
            config.rpc.chain_id
        );
    }
    if config.display.decimals > DISPLAY_DECIMALS {
        anyhow::bail!(
            "display.decimals {} exceeds the maximum of {}",
            config.display.decimals,
            DISPLAY_DECIMALS
        );
    }
    Ok(config)
}

pub fn default_config() -> anyhow::Result<AppConfig> {
    parse_config(DEFAULT_CONFIG)
}

async fn fetch_override() -> Result<String, String> {
    let response = Request::get(CONFIG_PATH)
        .send()
        .await
        .map_err(|e| format!("Failed to fetch {}: {}", CONFIG_PATH, e))?;

    if !response.ok() {
        return Err(format!("{} returned HTTP {}", CONFIG_PATH, response.status()));
    }

    response
        .text()
        .await
        .map_err(|e| format!("Failed to read {}: {}", CONFIG_PATH, e))
}

/// Load configuration
///
/// Search order:
/// 1. `config.toml` served next to the page
/// 2. Falls back to the embedded default config
pub async fn load_config() -> Result<AppConfig, String> {
    match fetch_override().await {
        Ok(contents) => match parse_config(&contents) {
            Ok(config) => {
                log::info!("Loaded config from {}", CONFIG_PATH);
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring invalid {}: {:#}", CONFIG_PATH, e),
        },
        Err(e) => log::warn!("{}", e),
    }

    log::info!("Using default embedded configuration");
    default_config().map_err(|e| format!("Embedded config is invalid: {:#}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = default_config().unwrap();
        assert_eq!(config.rpc.chain_id, 31337);
        assert_eq!(config.vault.decimals, 18);
        assert_eq!(config.staking_rewards.len(), 1);
        assert_eq!(config.staking_rewards[0].vault, config.vault.address);
        assert_eq!(config.display, DisplaySettings::default());
        assert!(config.prices_url.is_none());
    }

    #[test]
    fn test_optional_sections_default() {
        let config = parse_config(
            r#"
prices_url = "https://prices.example/optimism"

[rpc]
url = "https://mainnet.optimism.io"
chain_id = 10

[vault]
address = "0x0000000000000000000000000000000000000001"
chain_id = 10
decimals = 6
symbol = "yvUSDC"
"#,
        )
        .unwrap();
        assert_eq!(config.transactions, TransactionSettings::default());
        assert!(config.staking_rewards.is_empty());
        assert_eq!(config.prices_url.as_deref(), Some("https://prices.example/optimism"));
    }

    #[test]
    fn test_rejects_zero_vault() {
        let result = parse_config(
            r#"
[rpc]
url = "http://127.0.0.1:8545"
chain_id = 31337

[vault]
address = "0x0000000000000000000000000000000000000000"
chain_id = 31337
decimals = 18
symbol = "yv"
"#,
        );
        assert!(result.is_err());
    }

    const VAULT_ON_ANVIL: &str = r#"
[vault]
address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
chain_id = 31337
decimals = 18
symbol = "yvUSDC"
"#;

    #[test]
    fn test_rejects_vault_on_other_chain() {
        let contents = format!(
            "[rpc]\nurl = \"https://mainnet.optimism.io\"\nchain_id = 10\n{}",
            VAULT_ON_ANVIL
        );
        let err = parse_config(&contents).unwrap_err();
        assert!(err.to_string().contains("does not match rpc.chain_id"));
    }

    #[test]
    fn test_display_decimals_capped() {
        let rpc = "[rpc]\nurl = \"http://127.0.0.1:8545\"\nchain_id = 31337\n";

        let too_wide = format!("{}\n[display]\ndecimals = 18\n{}", rpc, VAULT_ON_ANVIL);
        let err = parse_config(&too_wide).unwrap_err();
        assert!(err.to_string().contains("display.decimals 18"));

        let narrower = format!("{}\n[display]\ndecimals = 4\n{}", rpc, VAULT_ON_ANVIL);
        assert_eq!(parse_config(&narrower).unwrap().display.decimals, 4);
    }
}
