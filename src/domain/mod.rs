pub mod common;
pub mod ledger;
pub mod partner;
pub mod transaction;

pub use common::names_match;
pub use ledger::Ledger;
pub use partner::{total_equity, Partner};
pub use transaction::{
    Payers, PoolKind, Recipient, StatusTone, Transaction, TransactionKind, TransactionPatch,
    TransactionStatus,
};
