//! Business logic helpers for managing transactions.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{Ledger, Transaction, TransactionKind, TransactionPatch};

/// Provides validated CRUD helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Validates and records a new transaction, returning its identifier.
    pub fn add(ledger: &mut Ledger, mut transaction: Transaction) -> ServiceResult<Uuid> {
        transaction.description = transaction.description.trim().to_string();
        transaction.notes = transaction.notes.trim().to_string();
        transaction.validate()?;
        let id = ledger.add_transaction(transaction);
        tracing::info!(transaction = %id, "transaction added");
        Ok(id)
    }

    /// Applies a single-field edit to the transaction identified by `id`.
    pub fn update(ledger: &mut Ledger, id: Uuid, patch: TransactionPatch) -> ServiceResult<()> {
        let txn = ledger
            .transaction_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        txn.apply(patch)?;
        ledger.touch();
        Ok(())
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<Transaction> {
        ledger
            .remove_transaction(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))
    }

    /// Transactions of one kind, or all of them when `kind` is `None`.
    pub fn list_by_kind(ledger: &Ledger, kind: Option<TransactionKind>) -> Vec<&Transaction> {
        match kind {
            Some(kind) => ledger.transactions_of_kind(kind),
            None => ledger.transactions.iter().collect(),
        }
    }
}
