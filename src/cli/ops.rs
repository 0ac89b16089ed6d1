use tracing::info;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::storage::KvStore;
use crate::token::TokenMetadata;

pub fn handle_genesis<S: KvStore>(ledger: &mut Ledger<S>, admin: &str) -> Result<()> {
    let info = ledger.genesis(admin)?;
    println!("Genesis complete: {} ({}) minted to {}", info.symbol, info.address, admin);
    println!("   Supply: {}", ledger.config().core.genesis_supply);
    Ok(())
}

pub fn handle_issue<S: KvStore>(
    ledger: &mut Ledger<S>,
    admin: &str,
    symbol: &str,
    supply: &str,
    metadata: Option<&str>,
) -> Result<()> {
    let metadata = match metadata {
        Some(json) => TokenMetadata::from_json(json)?,
        None => TokenMetadata::coin(symbol, 18),
    };
    let fee = ledger.config().fees.issue_fee_for(&metadata).to_string();
    let info = ledger.issue_token(admin, symbol, supply, metadata)?;
    println!("Issued {} at {}", info.symbol, info.address);
    println!("   Admin: {}  Supply: {}", info.admin, supply);
    println!("   Fee burned: {} {}", fee, ledger.config().native_symbol());
    Ok(())
}

pub fn handle_mint<S: KvStore>(ledger: &mut Ledger<S>, account: &str, token: &str, amount: &str) -> Result<()> {
    ledger.mint_to(account, token, amount)?;
    println!("Minted {} {} to {}", amount, token.to_uppercase(), account);
    Ok(())
}

pub fn handle_burn<S: KvStore>(
    ledger: &mut Ledger<S>,
    from: &str,
    token: &str,
    amount: &str,
    fee: Option<&str>,
) -> Result<()> {
    let fee = fee.unwrap_or(&ledger.config().fees.transfer_fee).to_string();
    ledger.burn_from(from, token, amount, &fee)?;
    println!("Burned {} {} from {} (fee {})", amount, token.to_uppercase(), from, fee);
    Ok(())
}

pub fn handle_transfer<S: KvStore>(
    ledger: &mut Ledger<S>,
    from: &str,
    to: &str,
    token: Option<&str>,
    amount: &str,
    fee: Option<&str>,
) -> Result<()> {
    let token = token.unwrap_or(ledger.config().native_symbol()).to_string();
    let fee = fee.unwrap_or(&ledger.config().fees.transfer_fee).to_string();
    ledger.transfer(from, to, &token, amount, &fee)?;
    info!(from, to, token = %token, amount, fee = %fee, "cli transfer");
    println!("Transferred {} {} from {} to {} (fee {})", amount, token.to_uppercase(), from, to, fee);
    Ok(())
}

pub fn handle_prune<S: KvStore>(ledger: &mut Ledger<S>, scope: &str, token: &str) -> Result<()> {
    let (total, records) = ledger.prune(scope, token)?;
    println!("Coalesced {} record(s) for {} {}: {}", records, scope, token.to_uppercase(), total);
    Ok(())
}
