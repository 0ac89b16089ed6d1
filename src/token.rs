//! Token registry.
//!
//! Every issued token has a `TokenInfo` entry stored as JSON under
//! `\0token\0SYMBOL\0`. The entry decides which supply sentinel the token's
//! mints and burns accumulate under.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{LedgerError, Result};
use crate::ledger::context::LedgerContext;
use crate::ledger::keys::{composite_key, TOKEN_OBJECT};
use crate::ledger::types::{normalize_symbol, SupplyFamily, TokenSymbol};
use crate::storage::KvStore;

const MAX_DECIMALS: u8 = 36;

/// A single collectible property. Anything else in the JSON bag, floats and
/// nested objects included, fails to parse.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum PropertyValue {
    Flag(bool),
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectibleMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum TokenMetadata {
    #[serde(rename = "COIN")]
    Coin { name: String, decimals: u8 },
    #[serde(rename = "NFT")]
    Nft(CollectibleMetadata),
    #[serde(rename = "GAME")]
    Game(CollectibleMetadata),
}

impl TokenMetadata {
    /// Parse and validate user-supplied metadata JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        let metadata: TokenMetadata = serde_json::from_str(text)
            .map_err(|e| LedgerError::ValidationError(format!("invalid token metadata: {}", e)))?;
        metadata.validate()?;
        Ok(metadata)
    }

    pub fn coin(name: &str, decimals: u8) -> Self {
        TokenMetadata::Coin {
            name: name.to_string(),
            decimals,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TokenMetadata::Coin { name, .. } => name,
            TokenMetadata::Nft(m) | TokenMetadata::Game(m) => &m.name,
        }
    }

    pub fn family(&self) -> SupplyFamily {
        match self {
            TokenMetadata::Coin { .. } => SupplyFamily::Coin,
            TokenMetadata::Nft(_) | TokenMetadata::Game(_) => SupplyFamily::Game,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name().trim().is_empty() {
            return Err(LedgerError::ValidationError("token name must not be empty".to_string()));
        }
        match self {
            TokenMetadata::Coin { decimals, .. } => {
                if *decimals > MAX_DECIMALS {
                    return Err(LedgerError::ValidationError(format!(
                        "decimals must be at most {}, got {}",
                        MAX_DECIMALS, decimals
                    )));
                }
            }
            TokenMetadata::Nft(m) | TokenMetadata::Game(m) => {
                for (key, value) in &m.properties {
                    let empty = match value {
                        PropertyValue::Text(s) => s.trim().is_empty(),
                        PropertyValue::List(items) => items.iter().any(|s| s.trim().is_empty()),
                        _ => false,
                    };
                    if key.is_empty() || empty {
                        return Err(LedgerError::ValidationError(format!(
                            "property {:?} must have a non-empty name and value",
                            key
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: TokenSymbol,
    pub address: String,
    pub admin: String,
    pub metadata: TokenMetadata,
    pub created_at: DateTime<Utc>,
}

impl TokenInfo {
    pub fn new(symbol: &str, admin: &str, metadata: TokenMetadata) -> Result<Self> {
        let symbol = normalize_symbol(symbol)?;
        Ok(Self {
            address: token_address(&symbol),
            symbol,
            admin: admin.to_string(),
            metadata,
            created_at: Utc::now(),
        })
    }
}

/// Deterministic on-ledger address of a token: `B-0x` + sha256 of its meta key.
pub fn token_address(symbol: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"token-meta-");
    hasher.update(symbol.to_uppercase().as_bytes());
    format!("B-0x{}", hex::encode(hasher.finalize()))
}

fn token_key(symbol: &str) -> Result<String> {
    let symbol = normalize_symbol(symbol)?;
    composite_key(TOKEN_OBJECT, &[symbol.as_str()])
}

impl<'a, S: KvStore> LedgerContext<'a, S> {
    /// Store a new registry entry. Registering a symbol twice is an error.
    ///
    /// Unregistered symbols account under the coin sentinel, so a collectible
    /// cannot be registered over a symbol that already has coin supply: those
    /// records would be stranded outside its family.
    pub fn register_token(&mut self, info: &TokenInfo) -> Result<()> {
        info.metadata.validate()?;
        self.ensure_account_scope(&info.admin)?;
        let key = token_key(&info.symbol)?;
        if self.store().get(&key)?.is_some() {
            return Err(LedgerError::ValidationError(format!(
                "token {} already exists",
                info.symbol
            )));
        }
        let family = info.metadata.family();
        if family != SupplyFamily::Coin {
            let coin_sentinel = self.config().supply_scope(SupplyFamily::Coin);
            if self.record_count(coin_sentinel, &info.symbol)? > 0 {
                return Err(LedgerError::ValidationError(format!(
                    "{} already has supply as a coin and cannot become a {:?} token",
                    info.symbol, family
                )));
            }
        }
        let bytes = serde_json::to_vec(info).map_err(|e| LedgerError::SerializationError(e.to_string()))?;
        self.store_mut().put(&key, bytes)?;
        info!(symbol = %info.symbol, address = %info.address, "token registered");
        Ok(())
    }

    pub fn token_info(&self, symbol: &str) -> Result<Option<TokenInfo>> {
        let key = token_key(symbol)?;
        match self.store().get(&key)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| LedgerError::StoreFault(format!("corrupt registry entry {:?}: {}", key, e))),
            None => Ok(None),
        }
    }

    /// The native coin is always known; any other token must be registered.
    pub fn ensure_token_registered(&self, token: &str) -> Result<()> {
        let symbol = normalize_symbol(token)?;
        if symbol == self.config().native_symbol() || self.token_info(&symbol)?.is_some() {
            return Ok(());
        }
        Err(LedgerError::ValidationError(format!("token {} does not exist", symbol)))
    }

    /// Supply family of `token`. Unregistered tokens count as coins.
    pub fn family_of(&self, token: &str) -> Result<SupplyFamily> {
        Ok(self
            .token_info(token)?
            .map(|info| info.metadata.family())
            .unwrap_or(SupplyFamily::Coin))
    }
}
