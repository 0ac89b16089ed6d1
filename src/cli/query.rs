use crate::error::Result;
use crate::ledger::Ledger;
use crate::storage::KvStore;

pub fn handle_balance<S: KvStore>(ledger: &Ledger<S>, address: &str, token: Option<&str>) -> Result<()> {
    let token = token.unwrap_or(ledger.config().native_symbol());
    let balance = ledger.balance(address, token)?;
    println!("{} {}", balance, token.to_uppercase());
    Ok(())
}

pub fn handle_supply<S: KvStore>(ledger: &mut Ledger<S>, token: Option<&str>) -> Result<()> {
    let token = token.unwrap_or(ledger.config().native_symbol()).to_string();
    let supply = ledger.total_supply(&token)?;
    println!("Total supply of {}: {}", token.to_uppercase(), supply);
    Ok(())
}

pub fn handle_reconcile<S: KvStore>(ledger: &mut Ledger<S>, token: &str) -> Result<()> {
    let report = ledger.reconcile(token)?;
    println!("{} reconciled", report.token);
    println!("   Circulating: {}", report.circulating);
    println!("   Supply:      {}", report.supply);
    println!("   Holders:     {}", report.holders);
    Ok(())
}

pub fn handle_token<S: KvStore>(ledger: &Ledger<S>, symbol: &str) -> Result<()> {
    match ledger.token_info(symbol)? {
        Some(info) => {
            let json = serde_json::to_string_pretty(&info)
                .map_err(|e| crate::error::LedgerError::SerializationError(e.to_string()))?;
            println!("{}", json);
        }
        None => println!("Token {} is not registered", symbol.to_uppercase()),
    }
    Ok(())
}
