//! Ledger facade and transaction coordinator.
//!
//! `Ledger` owns the config and the backing store. Each public operation is
//! one invocation: it runs against a `WorkingSet` overlay and its writes are
//! applied with a single atomic batch only if the whole invocation succeeds.
//! `&mut self` serializes invocations.

use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use super::context::LedgerContext;
use super::types::{normalize_symbol, Reconciliation};
use crate::amount::Amount;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::storage::{KvStore, WorkingSet};
use crate::token::{TokenInfo, TokenMetadata};

pub struct Ledger<S: KvStore> {
    config: LedgerConfig,
    store: S,
}

impl<S: KvStore> Ledger<S> {
    pub fn new(config: LedgerConfig, store: S) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run one invocation. Writes are committed atomically on `Ok` and
    /// discarded on `Err`.
    pub fn execute<T, F>(&mut self, op: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut LedgerContext<'_, WorkingSet<'_, S>>) -> Result<T>,
    {
        let tx_id = Uuid::new_v4().simple().to_string();
        let span = info_span!("invocation", op, tx_id = %tx_id);
        let _enter = span.enter();

        let (result, ops) = {
            let mut overlay = WorkingSet::new(&self.store);
            let result = {
                let mut ctx = LedgerContext::with_tx_id(&self.config, &mut overlay, tx_id.as_str());
                f(&mut ctx)
            };
            (result, overlay.into_ops())
        };

        match result {
            Ok(value) => {
                if !ops.is_empty() {
                    let writes = ops.len();
                    self.store.apply_batch(ops).map_err(|e| {
                        warn!(error = %e, "commit failed, invocation discarded");
                        LedgerError::from(e)
                    })?;
                    debug!(writes, "invocation committed");
                }
                Ok(value)
            }
            Err(e) => {
                warn!(error = %e, discarded = ops.len(), "invocation aborted");
                Err(e)
            }
        }
    }

    /// Read-only invocation. Anything the closure writes is dropped.
    pub fn view<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut LedgerContext<'_, WorkingSet<'_, S>>) -> Result<T>,
    {
        let mut overlay = WorkingSet::new(&self.store);
        let mut ctx = LedgerContext::new(&self.config, &mut overlay);
        f(&mut ctx)
    }

    pub fn balance(&self, scope: &str, token: &str) -> Result<String> {
        self.view(|ctx| ctx.balance(scope, token)).map(|b| b.to_string())
    }

    pub fn balance_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<String>> {
        let balances = self.view(|ctx| ctx.balance_batch(pairs))?;
        Ok(balances.iter().map(Amount::to_string).collect())
    }

    /// Policy-level transfer: checks the sender can cover the fee, moves the
    /// amount and burns the fee from native supply, all in one invocation.
    pub fn transfer(&mut self, from: &str, to: &str, token: &str, amount: &str, fee: &str) -> Result<()> {
        let amount = Amount::parse_positive(amount)?;
        let fee = Amount::parse_non_negative(fee)?;
        self.execute("transfer", |ctx| {
            let native = ctx.config().native_symbol();
            ctx.check_fee_affordable(from, token, &amount, &fee)?;
            ctx.transfer(from, to, token, &amount, &fee)?;
            if fee.is_positive() {
                ctx.burn_supply(native, &fee)?;
            }
            Ok(())
        })
    }

    /// Transfer several tokens to one recipient for a single `fee`.
    pub fn transfer_batch(&mut self, from: &str, to: &str, legs: &[(&str, &str)], fee: &str) -> Result<()> {
        let fee = Amount::parse_non_negative(fee)?;
        let legs = parse_legs(legs)?;
        self.execute("transfer_batch", |ctx| {
            let native = ctx.config().native_symbol();
            let native_total = native_leg_total(native, &legs)?;
            ctx.check_fee_affordable(from, native, &native_total, &fee)?;
            ctx.transfer_batch(from, to, &legs, &fee)?;
            if fee.is_positive() {
                ctx.burn_supply(native, &fee)?;
            }
            Ok(())
        })
    }

    pub fn mint(&mut self, token: &str, amount: &str) -> Result<()> {
        let amount = Amount::parse_positive(amount)?;
        self.execute("mint", |ctx| {
            ctx.ensure_token_registered(token)?;
            ctx.mint_supply(token, &amount)
        })
    }

    pub fn burn(&mut self, token: &str, amount: &str) -> Result<()> {
        let amount = Amount::parse_positive(amount)?;
        self.execute("burn", |ctx| {
            ctx.ensure_token_registered(token)?;
            ctx.burn_supply(token, &amount)
        })
    }

    pub fn mint_to(&mut self, account: &str, token: &str, amount: &str) -> Result<()> {
        let amount = Amount::parse_positive(amount)?;
        self.execute("mint_to", |ctx| {
            ctx.ensure_token_registered(token)?;
            ctx.mint_to(account, token, &amount)
        })
    }

    /// Burn from `holder` and charge `fee` in native coin, burned as well.
    pub fn burn_from(&mut self, holder: &str, token: &str, amount: &str, fee: &str) -> Result<()> {
        let amount = Amount::parse_positive(amount)?;
        let fee = Amount::parse_non_negative(fee)?;
        self.execute("burn_from", |ctx| {
            ctx.ensure_token_registered(token)?;
            ctx.check_fee_affordable(holder, token, &amount, &fee)?;
            ctx.burn_from(holder, token, &amount)?;
            ctx.burn_fee(holder, &fee)
        })
    }

    /// Burn several distinct tokens from `holder` for a single `fee`.
    pub fn burn_batch(&mut self, holder: &str, legs: &[(&str, &str)], fee: &str) -> Result<()> {
        let fee = Amount::parse_non_negative(fee)?;
        let legs = parse_legs(legs)?;
        self.execute("burn_batch", |ctx| {
            for (token, _) in &legs {
                ctx.ensure_token_registered(token)?;
            }
            let native = ctx.config().native_symbol();
            let native_total = native_leg_total(native, &legs)?;
            ctx.check_fee_affordable(holder, native, &native_total, &fee)?;
            ctx.burn_batch(holder, &legs)?;
            ctx.burn_fee(holder, &fee)
        })
    }

    /// Coalesced total supply. Commits the coalescing of the sentinel prefix.
    pub fn total_supply(&mut self, token: &str) -> Result<String> {
        self.execute("total_supply", |ctx| {
            ctx.ensure_token_registered(token)?;
            ctx.query_supply(token)
        })
        .map(|s| s.to_string())
    }

    pub fn total_supply_batch(&mut self, tokens: &[&str]) -> Result<Vec<String>> {
        let supplies = self.execute("total_supply_batch", |ctx| {
            for token in tokens {
                ctx.ensure_token_registered(token)?;
            }
            ctx.query_supply_batch(tokens)
        })?;
        Ok(supplies.iter().map(Amount::to_string).collect())
    }

    pub fn prune(&mut self, scope: &str, token: &str) -> Result<(String, usize)> {
        let outcome = self.execute("prune", |ctx| ctx.prune(scope, token))?;
        Ok((outcome.total.to_string(), outcome.records_seen))
    }

    pub fn reconcile(&mut self, token: &str) -> Result<Reconciliation> {
        self.execute("reconcile", |ctx| ctx.reconcile(token))
    }

    /// Register the native coin and mint the genesis supply to `admin`.
    pub fn genesis(&mut self, admin: &str) -> Result<TokenInfo> {
        let supply = Amount::parse_positive(&self.config.core.genesis_supply)?;
        let info = self.execute("genesis", |ctx| {
            let core = &ctx.config().core;
            if ctx.token_info(&core.native_symbol)?.is_some() {
                return Err(LedgerError::ValidationError(format!(
                    "{} is already initialised",
                    core.native_symbol
                )));
            }
            let metadata = TokenMetadata::coin(&core.native_symbol, core.genesis_decimals);
            let info = TokenInfo::new(&core.native_symbol, admin, metadata)?;
            ctx.register_token(&info)?;
            ctx.mint_to(admin, &info.symbol, &supply)?;
            Ok(info)
        })?;
        info!(admin, symbol = %info.symbol, supply = %supply, "genesis complete");
        Ok(info)
    }

    /// Issue a new token to `admin`, charging the issue fee for its type in
    /// native coin.
    pub fn issue_token(&mut self, admin: &str, symbol: &str, supply: &str, metadata: TokenMetadata) -> Result<TokenInfo> {
        let supply = Amount::parse_positive(supply)?;
        let fee = Amount::parse_non_negative(self.config.fees.issue_fee_for(&metadata))?;
        self.execute("issue_token", |ctx| {
            let native = ctx.config().native_symbol();
            if normalize_symbol(symbol)? == native {
                return Err(LedgerError::ValidationError(format!(
                    "{} is the native coin and cannot be issued",
                    native
                )));
            }
            let info = TokenInfo::new(symbol, admin, metadata)?;
            ctx.check_fee_affordable(admin, native, &Amount::zero(), &fee)?;
            ctx.register_token(&info)?;
            ctx.burn_fee(admin, &fee)?;
            ctx.mint_to(admin, &info.symbol, &supply)?;
            Ok(info)
        })
    }

    pub fn token_info(&self, symbol: &str) -> Result<Option<TokenInfo>> {
        self.view(|ctx| ctx.token_info(symbol))
    }
}

fn parse_legs<'t>(legs: &[(&'t str, &str)]) -> Result<Vec<(&'t str, Amount)>> {
    legs.iter()
        .map(|(token, amount)| Amount::parse_positive(amount).map(|a| (*token, a)))
        .collect()
}

/// Sum of the legs that move the native coin.
fn native_leg_total(native: &str, legs: &[(&str, Amount)]) -> Result<Amount> {
    let mut total = Amount::zero();
    for (token, amount) in legs {
        if normalize_symbol(token)? == native {
            total += amount;
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FaultyStore;
    use crate::storage::{MemoryStore, SledStore};

    fn ledger() -> Ledger<MemoryStore> {
        Ledger::new(LedgerConfig::default(), MemoryStore::new()).unwrap()
    }

    fn supply_matches_accounts(ledger: &mut Ledger<MemoryStore>, token: &str) {
        let report = ledger.reconcile(token).unwrap();
        assert_eq!(report.circulating, report.supply);
    }

    /// Register a coin without genesis or an issue fee.
    fn register_coin<S: KvStore>(ledger: &mut Ledger<S>, symbol: &str) {
        ledger
            .execute("register", |ctx| {
                ctx.register_token(&TokenInfo::new(symbol, "admin", TokenMetadata::coin(symbol, 18))?)
            })
            .unwrap();
    }

    fn collectible(kind: &str, name: &str) -> TokenMetadata {
        TokenMetadata::from_json(&format!(r#"{{"type": "{}", "name": "{}"}}"#, kind, name)).unwrap()
    }

    #[test]
    fn test_mint_and_spend() {
        let mut ledger = ledger();
        ledger.mint_to("A", "BUSY", "100").unwrap();
        ledger.transfer("A", "B", "BUSY", "30", "1").unwrap();

        assert_eq!(ledger.balance("A", "BUSY").unwrap(), "69");
        assert_eq!(ledger.balance("B", "BUSY").unwrap(), "30");
        assert_eq!(ledger.total_supply("BUSY").unwrap(), "99");
        supply_matches_accounts(&mut ledger, "BUSY");
    }

    #[test]
    fn test_micro_transfers_then_prune() {
        let mut ledger = ledger();
        ledger.mint_to("A", "BUSY", "100").unwrap();
        for _ in 0..50 {
            ledger.transfer("A", "B", "BUSY", "1", "0").unwrap();
        }
        let a_before = ledger.balance("A", "BUSY").unwrap();
        let b_before = ledger.balance("B", "BUSY").unwrap();
        assert_eq!(a_before, "50");
        assert_eq!(b_before, "50");

        let (a_total, a_seen) = ledger.prune("A", "BUSY").unwrap();
        let (b_total, b_seen) = ledger.prune("B", "BUSY").unwrap();
        assert_eq!((a_total.as_str(), a_seen), ("50", 51));
        assert_eq!((b_total.as_str(), b_seen), ("50", 50));
        assert_eq!(ledger.balance("A", "BUSY").unwrap(), a_before);
        assert_eq!(ledger.balance("B", "BUSY").unwrap(), b_before);

        let counts = ledger
            .view(|ctx| Ok((ctx.record_count("A", "BUSY")?, ctx.record_count("B", "BUSY")?)))
            .unwrap();
        assert_eq!(counts, (1, 1));
    }

    #[test]
    fn test_precision_round_trip() {
        let mut ledger = ledger();
        let big = "255000000000000000000000000";
        ledger.mint_to("A", "BUSY", big).unwrap();
        assert_eq!(ledger.balance("A", "BUSY").unwrap(), big);
        ledger.transfer("A", "B", "BUSY", big, "0").unwrap();
        assert_eq!(ledger.balance("B", "BUSY").unwrap(), big);
        assert_eq!(ledger.balance("A", "BUSY").unwrap(), "0");
        assert_eq!(ledger.total_supply("BUSY").unwrap(), big);
        assert_eq!(ledger.prune("B", "BUSY").unwrap().0, big);
    }

    #[test]
    fn test_conservation_over_sequence() {
        let mut ledger = ledger();
        register_coin(&mut ledger, "GOLD");
        ledger.mint_to("A", "BUSY", "1000").unwrap();
        ledger.mint_to("B", "GOLD", "40").unwrap();
        ledger.transfer("A", "B", "BUSY", "300", "5").unwrap();
        supply_matches_accounts(&mut ledger, "BUSY");
        ledger.transfer("B", "C", "GOLD", "15", "2").unwrap();
        ledger.burn_from("A", "BUSY", "100", "0").unwrap();
        ledger.transfer_batch("B", "A", &[("GOLD", "5"), ("BUSY", "10")], "3").unwrap();
        ledger.prune("A", "BUSY").unwrap();

        supply_matches_accounts(&mut ledger, "BUSY");
        supply_matches_accounts(&mut ledger, "GOLD");
        assert_eq!(ledger.total_supply("BUSY").unwrap(), "890");
        assert_eq!(ledger.balance("B", "BUSY").unwrap(), "285");
    }

    #[test]
    fn test_failed_invocation_writes_nothing() {
        let mut ledger = ledger();
        ledger.mint_to("A", "BUSY", "10").unwrap();
        let before = ledger.store().len();

        let err = ledger
            .execute("partial", |ctx| {
                ctx.put_delta("A", "BUSY", "B", &Amount::from(-4i64))?;
                ctx.put_delta("B", "BUSY", "A", &Amount::from(4u64))?;
                Err::<(), _>(LedgerError::InvariantViolation("abort".to_string()))
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvariantViolation(_)));
        assert_eq!(ledger.store().len(), before);
        assert_eq!(ledger.balance("B", "BUSY").unwrap(), "0");

        // unaffordable fee: nothing moves
        let err = ledger.transfer("A", "B", "BUSY", "10", "1").unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.store().len(), before);
    }

    #[test]
    fn test_read_your_writes_within_invocation() {
        let mut ledger = ledger();
        let seen = ledger
            .execute("rw", |ctx| {
                ctx.mint_to("A", "BUSY", &Amount::from(7u64))?;
                ctx.balance("A", "BUSY")
            })
            .unwrap();
        assert_eq!(seen, Amount::from(7u64));
    }

    #[test]
    fn test_commit_failure_discards_writes() {
        let mut ledger = Ledger::new(LedgerConfig::default(), FaultyStore::default()).unwrap();
        ledger.mint_to("A", "BUSY", "10").unwrap();

        let mut store = ledger.into_store();
        store.fail_commit = true;
        let before = store.inner.len();
        let mut ledger = Ledger::new(LedgerConfig::default(), store).unwrap();
        let err = ledger.transfer("A", "B", "BUSY", "5", "0").unwrap_err();
        assert!(matches!(err, LedgerError::StoreFault(_)));
        assert_eq!(ledger.store().inner.len(), before);
        assert_eq!(ledger.balance("A", "BUSY").unwrap(), "10");
    }

    #[test]
    fn test_prune_fault_leaves_records() {
        let store = FaultyStore::new(MemoryStore::new());
        let mut ledger = Ledger::new(LedgerConfig::default(), store).unwrap();
        ledger.mint_to("A", "BUSY", "10").unwrap();
        for _ in 0..3 {
            ledger.transfer("A", "B", "BUSY", "1", "0").unwrap();
        }
        let before = ledger.store().inner.len();

        let mut store = ledger.into_store();
        store.fail_scan_at = Some(2);
        let mut ledger = Ledger::new(LedgerConfig::default(), store).unwrap();
        let err = ledger.prune("A", "BUSY").unwrap_err();
        assert!(matches!(err, LedgerError::StoreFault(_)));
        assert_eq!(ledger.store().inner.len(), before);

        let mut store = ledger.into_store();
        store.fail_scan_at = None;
        store.fail_commit = true;
        let mut ledger = Ledger::new(LedgerConfig::default(), store).unwrap();
        let err = ledger.prune("A", "BUSY").unwrap_err();
        assert!(matches!(err, LedgerError::StoreFault(_)));
        assert_eq!(ledger.store().inner.len(), before);

        assert_eq!(ledger.view(|ctx| ctx.record_count("A", "BUSY")).unwrap(), 4);
        assert_eq!(ledger.balance("A", "BUSY").unwrap(), "7");
    }

    #[test]
    fn test_amount_strings_validated_uniformly() {
        let mut ledger = ledger();
        ledger.mint_to("A", "BUSY", "10").unwrap();
        for bad in ["", "abc", "1.5", "+3", " 2", "0", "-1"] {
            let err = ledger.transfer("A", "B", "BUSY", bad, "0").unwrap_err();
            assert!(matches!(err, LedgerError::ValidationError(_)), "{:?}", bad);
        }
        assert!(ledger.transfer("A", "B", "BUSY", "1", "-1").is_err());
        assert!(ledger.mint("BUSY", "0").is_err());
        assert!(matches!(ledger.balance("0x", "BUSY"), Err(LedgerError::InvalidScope(_))));
    }

    #[test]
    fn test_genesis_and_issue() {
        let mut ledger = ledger();
        let native = ledger.genesis("admin").unwrap();
        assert_eq!(native.symbol, "BUSY");
        assert_eq!(ledger.balance("admin", "BUSY").unwrap(), "255000000000000000000000000");
        assert!(matches!(ledger.genesis("admin"), Err(LedgerError::ValidationError(_))));

        let meta = TokenMetadata::coin("Gold", 18);
        let gold = ledger.issue_token("admin", "gold", "1000", meta.clone()).unwrap();
        assert_eq!(gold.symbol, "GOLD");
        assert_eq!(ledger.token_info("GOLD").unwrap(), Some(gold));
        assert_eq!(ledger.balance("admin", "GOLD").unwrap(), "1000");
        assert_eq!(ledger.balance("admin", "BUSY").unwrap(), "254995000000000000000000000");
        assert_eq!(ledger.total_supply("BUSY").unwrap(), "254995000000000000000000000");

        assert!(ledger.issue_token("admin", "GOLD", "1", meta.clone()).is_err());
        assert!(ledger.issue_token("admin", "busy", "1", meta.clone()).is_err());
        let broke = ledger.issue_token("pauper", "SILVER", "1", meta).unwrap_err();
        assert!(matches!(broke, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.token_info("SILVER").unwrap(), None);
        supply_matches_accounts(&mut ledger, "BUSY");
    }

    #[test]
    fn test_unregistered_tokens_refused() {
        let mut ledger = ledger();
        ledger.genesis("admin").unwrap();
        let err = ledger.mint_to("A", "SWORD", "5").unwrap_err();
        assert!(matches!(err, LedgerError::ValidationError(_)));
        assert!(matches!(ledger.total_supply("SWORD"), Err(LedgerError::ValidationError(_))));
        assert!(ledger.mint("SWORD", "5").is_err());

        ledger.issue_token("admin", "SWORD", "10", collectible("GAME", "Sword")).unwrap();
        assert_eq!(ledger.total_supply("SWORD").unwrap(), "10");
        let report = ledger.reconcile("SWORD").unwrap();
        assert_eq!(report.circulating, Amount::from(10u64));
        assert_eq!(report.supply, Amount::from(10u64));

        // coin supply written below the facade blocks a collectible issue
        ledger
            .execute("seed", |ctx| ctx.mint_to("A", "AXE", &Amount::from(5u64)))
            .unwrap();
        let admin_busy = ledger.balance("admin", "BUSY").unwrap();
        let err = ledger.issue_token("admin", "AXE", "10", collectible("GAME", "Axe")).unwrap_err();
        assert!(matches!(err, LedgerError::ValidationError(_)));
        assert_eq!(ledger.token_info("AXE").unwrap(), None);
        assert_eq!(ledger.balance("admin", "BUSY").unwrap(), admin_busy);
    }

    #[test]
    fn test_issue_fee_by_token_type() {
        let mut config = LedgerConfig::default();
        config.fees.issue_fee_game = "7000".to_string();
        config.fees.issue_fee_nft = "0".to_string();
        let mut ledger = Ledger::new(config, MemoryStore::new()).unwrap();
        ledger.genesis("admin").unwrap();

        ledger.issue_token("admin", "SWORD", "1", collectible("GAME", "Sword")).unwrap();
        assert_eq!(ledger.balance("admin", "BUSY").unwrap(), "254999999999999999999993000");
        ledger.issue_token("admin", "BADGE", "1", collectible("NFT", "Badge")).unwrap();
        assert_eq!(ledger.balance("admin", "BUSY").unwrap(), "254999999999999999999993000");
        assert_eq!(ledger.total_supply("BUSY").unwrap(), "254999999999999999999993000");
    }

    #[test]
    fn test_burn_charges_fee() {
        let mut ledger = ledger();
        register_coin(&mut ledger, "GOLD");
        ledger.mint_to("A", "BUSY", "100").unwrap();
        ledger.mint_to("A", "GOLD", "5").unwrap();

        let err = ledger.burn_from("A", "BUSY", "99", "2").unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.balance("A", "BUSY").unwrap(), "100");

        ledger.burn_from("A", "BUSY", "90", "2").unwrap();
        assert_eq!(ledger.balance("A", "BUSY").unwrap(), "8");
        assert_eq!(ledger.total_supply("BUSY").unwrap(), "8");

        assert!(ledger.burn_from("A", "GOLD", "5", "9").is_err());
        ledger.burn_from("A", "GOLD", "5", "8").unwrap();
        assert_eq!(ledger.balance("A", "BUSY").unwrap(), "0");
        assert_eq!(ledger.balance("A", "GOLD").unwrap(), "0");
        supply_matches_accounts(&mut ledger, "BUSY");
        supply_matches_accounts(&mut ledger, "GOLD");
    }

    #[test]
    fn test_burn_batch_and_supply_batch() {
        let mut ledger = ledger();
        register_coin(&mut ledger, "GOLD");
        ledger.mint_to("A", "BUSY", "100").unwrap();
        ledger.mint_to("A", "GOLD", "10").unwrap();

        let legs = [("BUSY", "95"), ("GOLD", "1")];
        let err = ledger.burn_batch("A", &legs, "6").unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert!(matches!(
            ledger.burn_batch("A", &[("GOLD", "1"), ("NOPE", "1")], "0"),
            Err(LedgerError::ValidationError(_))
        ));
        assert_eq!(ledger.total_supply_batch(&["BUSY", "GOLD"]).unwrap(), vec!["100", "10"]);

        ledger.burn_batch("A", &legs, "5").unwrap();
        assert_eq!(ledger.balance_batch(&[("A", "BUSY"), ("A", "GOLD")]).unwrap(), vec!["0", "9"]);
        assert_eq!(ledger.total_supply_batch(&["busy", "GOLD"]).unwrap(), vec!["0", "9"]);
        assert!(matches!(
            ledger.total_supply_batch(&["BUSY", "NOPE"]),
            Err(LedgerError::ValidationError(_))
        ));
        supply_matches_accounts(&mut ledger, "GOLD");
    }

    #[test]
    fn test_sled_backed_ledger() {
        let store = SledStore::temporary().unwrap();
        let mut ledger = Ledger::new(LedgerConfig::default(), store).unwrap();
        ledger.mint_to("A", "BUSY", "100").unwrap();
        ledger.transfer("A", "B", "BUSY", "30", "1").unwrap();
        assert_eq!(ledger.balance("A", "BUSY").unwrap(), "69");
        assert_eq!(ledger.total_supply("BUSY").unwrap(), "99");
        assert_eq!(ledger.prune("A", "BUSY").unwrap(), ("69".to_string(), 3));
    }
}
