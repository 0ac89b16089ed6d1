use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::{LedgerError, Result};
use crate::ledger::types::SupplyFamily;
use crate::token::TokenMetadata;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LedgerConfig {
    pub core: CoreConfig,
    #[serde(default)]
    pub fees: FeeConfig,
    pub node: NodeConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CoreConfig {
    pub native_symbol: String,
    #[serde(default = "default_null_scope")]
    pub null_scope: String,
    pub coin_supply_scope: String,
    pub game_supply_scope: String,
    #[serde(default = "default_fee_sink")]
    pub fee_sink: String,
    pub genesis_supply: String,
    #[serde(default = "default_genesis_decimals")]
    pub genesis_decimals: u8,
}

fn default_null_scope() -> String {
    "0x".to_string()
}

fn default_fee_sink() -> String {
    "burnTxFee".to_string()
}

fn default_genesis_decimals() -> u8 {
    18
}

/// Fee amounts used by the CLI; the transfer engine never picks a fee itself.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FeeConfig {
    #[serde(default = "default_transfer_fee")]
    pub transfer_fee: String,
    /// Issue fees per token type, burned from the admin's native balance.
    #[serde(default = "default_issue_fee")]
    pub issue_fee_coin: String,
    #[serde(default = "default_issue_fee")]
    pub issue_fee_nft: String,
    #[serde(default = "default_issue_fee")]
    pub issue_fee_game: String,
}

impl FeeConfig {
    pub fn issue_fee_for(&self, metadata: &TokenMetadata) -> &str {
        match metadata {
            TokenMetadata::Coin { .. } => &self.issue_fee_coin,
            TokenMetadata::Nft(_) => &self.issue_fee_nft,
            TokenMetadata::Game(_) => &self.issue_fee_game,
        }
    }
}

fn default_transfer_fee() -> String {
    "1000000000000000".to_string()
}

fn default_issue_fee() -> String {
    "5000000000000000000000".to_string()
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            transfer_fee: default_transfer_fee(),
            issue_fee_coin: default_issue_fee(),
            issue_fee_nft: default_issue_fee(),
            issue_fee_game: default_issue_fee(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NodeConfig {
    pub db_path: String,
    pub log_level: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            core: CoreConfig {
                native_symbol: "BUSY".to_string(),
                null_scope: default_null_scope(),
                coin_supply_scope: "TOTAL~SUPPLY".to_string(),
                game_supply_scope: "NFT~TOTAL~SUPPLY".to_string(),
                fee_sink: default_fee_sink(),
                genesis_supply: "255000000000000000000000000".to_string(),
                genesis_decimals: default_genesis_decimals(),
            },
            fees: FeeConfig::default(),
            node: NodeConfig {
                db_path: "./data/ledger".to_string(),
                log_level: "info".to_string(),
            },
        }
    }
}

impl LedgerConfig {
    /// Load and validate a config file.
    pub fn load(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::ConfigError(format!("reading {}: {}", path, e)))?;
        let config: LedgerConfig = toml::from_str(&text)
            .map_err(|e| LedgerError::ConfigError(format!("parsing {}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match Self::load(path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{}. Using Defaults.", e);
                    Self::default()
                }
            }
        } else {
            eprintln!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, s);
            }
            config
        }
    }

    pub fn validate(&self) -> Result<()> {
        let core = &self.core;
        if core.native_symbol.is_empty() || core.native_symbol != core.native_symbol.to_uppercase() {
            return Err(LedgerError::ConfigError(format!(
                "native_symbol '{}' must be non-empty upper-case",
                core.native_symbol
            )));
        }
        let reserved = [
            ("null_scope", &core.null_scope),
            ("coin_supply_scope", &core.coin_supply_scope),
            ("game_supply_scope", &core.game_supply_scope),
            ("fee_sink", &core.fee_sink),
        ];
        for (name, value) in reserved {
            if value.is_empty() {
                return Err(LedgerError::ConfigError(format!("{} must not be empty", name)));
            }
        }
        if core.coin_supply_scope == core.game_supply_scope {
            return Err(LedgerError::ConfigError(
                "coin and game supply scopes must differ".to_string(),
            ));
        }
        if core.null_scope == core.coin_supply_scope || core.null_scope == core.game_supply_scope {
            return Err(LedgerError::ConfigError(
                "a supply scope cannot be the null scope".to_string(),
            ));
        }
        Amount::parse_positive(&core.genesis_supply)
            .map_err(|e| LedgerError::ConfigError(format!("genesis_supply: {}", e)))?;
        let fees = [
            ("transfer_fee", &self.fees.transfer_fee),
            ("issue_fee_coin", &self.fees.issue_fee_coin),
            ("issue_fee_nft", &self.fees.issue_fee_nft),
            ("issue_fee_game", &self.fees.issue_fee_game),
        ];
        for (name, value) in fees {
            Amount::parse_non_negative(value).map_err(|e| LedgerError::ConfigError(format!("{}: {}", name, e)))?;
        }
        Ok(())
    }

    pub fn native_symbol(&self) -> &str {
        &self.core.native_symbol
    }

    /// The sentinel scope accumulating total supply for a token family.
    pub fn supply_scope(&self, family: SupplyFamily) -> &str {
        match family {
            SupplyFamily::Coin => &self.core.coin_supply_scope,
            SupplyFamily::Game => &self.core.game_supply_scope,
        }
    }

    pub fn is_sentinel(&self, scope: &str) -> bool {
        scope == self.core.coin_supply_scope || scope == self.core.game_supply_scope
    }
}
