//! Application configuration management.

use serde::Deserialize;

/// Chain id of the target test network.
pub const DEFAULT_CHAIN_ID: u64 = 10143;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Chain RPC configuration.
    #[serde(default)]
    pub chain: ChainConfig,
    /// Partner API endpoints.
    #[serde(default)]
    pub partners: PartnersConfig,
    /// Contract address overrides.
    #[serde(default)]
    pub contracts: ContractsConfig,
    /// Platform tag merged into proxied swap payloads.
    #[serde(default = "default_platform_tag")]
    pub platform_tag: String,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_platform_tag() -> String {
    "amparo".to_string()
}

/// Chain RPC configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Chain id used to pick the contract set.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Transport timeout for a single RPC call.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Expected block interval, used to derive throughput.
    #[serde(default = "default_block_time_ms")]
    pub block_time_ms: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            request_timeout_secs: default_timeout_secs(),
            block_time_ms: default_block_time_ms(),
        }
    }
}

fn default_rpc_url() -> String {
    "https://testnet-rpc.monad.xyz".to_string()
}

fn default_chain_id() -> u64 {
    DEFAULT_CHAIN_ID
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_block_time_ms() -> u64 {
    1000
}

/// Base URL and credentials for one partner API.
#[derive(Debug, Clone, Deserialize)]
pub struct PartnerEndpoint {
    /// Base URL, without trailing slash.
    pub base_url: String,
    /// API key sent in the partner's auth header.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Transport timeout for a single call.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl PartnerEndpoint {
    /// Creates an endpoint with no API key and the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            request_timeout_secs: default_timeout_secs(),
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Partner API endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PartnersConfig {
    /// DEX aggregator (swap and gasless endpoints).
    #[serde(default = "default_dex")]
    pub dex: PartnerEndpoint,
    /// Blockchain indexer (GraphQL).
    #[serde(default = "default_indexer")]
    pub indexer: PartnerEndpoint,
    /// Reinsurance partner.
    #[serde(default = "default_reinsurance")]
    pub reinsurance: PartnerEndpoint,
    /// Impact tracking partner.
    #[serde(default = "default_impact")]
    pub impact: PartnerEndpoint,
}

impl Default for PartnersConfig {
    fn default() -> Self {
        Self {
            dex: default_dex(),
            indexer: default_indexer(),
            reinsurance: default_reinsurance(),
            impact: default_impact(),
        }
    }
}

fn default_dex() -> PartnerEndpoint {
    PartnerEndpoint::new("https://api.0x.org")
}

fn default_indexer() -> PartnerEndpoint {
    PartnerEndpoint::new("http://localhost:8081/v1/graphql")
}

fn default_reinsurance() -> PartnerEndpoint {
    PartnerEndpoint::new("http://localhost:8082")
}

fn default_impact() -> PartnerEndpoint {
    PartnerEndpoint::new("http://localhost:8083")
}

/// Contract address overrides, applied over the built-in defaults.
///
/// Every field is a `0x`-prefixed hex address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractsConfig {
    /// Path to a deployment manifest written by the deploy scripts.
    #[serde(default)]
    pub manifest_path: Option<String>,
    /// Oracle contract.
    #[serde(default)]
    pub oracle: Option<String>,
    /// Insurance pool contract.
    #[serde(default)]
    pub insurance_pool: Option<String>,
    /// Policy NFT contract.
    #[serde(default)]
    pub policy_nft: Option<String>,
    /// Reinsurance token contract.
    #[serde(default)]
    pub reinsurance_token: Option<String>,
    /// Gasless payment handler contract.
    #[serde(default)]
    pub gasless_payment_handler: Option<String>,
    /// Savings goal handler contract.
    #[serde(default)]
    pub savings_goal_handler: Option<String>,
}

impl ContractsConfig {
    /// Returns `(role key, address)` pairs for every override that is set.
    ///
    /// Role keys use the camelCase names of the deployment manifest.
    #[must_use]
    pub fn overrides(&self) -> Vec<(&'static str, &str)> {
        [
            ("oracle", &self.oracle),
            ("insurancePool", &self.insurance_pool),
            ("policyNFT", &self.policy_nft),
            ("reinsuranceToken", &self.reinsurance_token),
            ("gaslessPaymentHandler", &self.gasless_payment_handler),
            ("savingsGoalHandler", &self.savings_goal_handler),
        ]
        .into_iter()
        .filter_map(|(role, addr)| addr.as_deref().map(|a| (role, a)))
        .collect()
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("AMPARO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        temp_env::with_vars_unset(
            ["AMPARO__CHAIN__CHAIN_ID", "AMPARO__SERVER__PORT", "RUN_MODE"],
            || {
                let config = AppConfig::load().expect("defaults should load");
                assert_eq!(config.chain.chain_id, DEFAULT_CHAIN_ID);
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.platform_tag, "amparo");
                assert!(config.contracts.overrides().is_empty());
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("AMPARO__CHAIN__RPC_URL", Some("http://127.0.0.1:8545")),
                ("AMPARO__SERVER__PORT", Some("9090")),
                (
                    "AMPARO__CONTRACTS__ORACLE",
                    Some("0x00000000000000000000000000000000000000aa"),
                ),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.chain.rpc_url, "http://127.0.0.1:8545");
                assert_eq!(config.server.port, 9090);
                assert_eq!(
                    config.contracts.overrides(),
                    vec![("oracle", "0x00000000000000000000000000000000000000aa")]
                );
            },
        );
    }

    #[test]
    fn test_partner_endpoint_base_trims_slash() {
        let endpoint = PartnerEndpoint::new("https://api.0x.org/").with_api_key("k");
        assert_eq!(endpoint.base(), "https://api.0x.org");
        assert_eq!(endpoint.api_key.as_deref(), Some("k"));
    }
}
