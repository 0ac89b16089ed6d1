pub mod amount;
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod storage;
pub mod token;
