use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    common::names_match,
    partner::Partner,
    transaction::{Transaction, TransactionKind},
};
use crate::errors::LedgerError;

/// Snapshot of a business: its partners and recorded transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    partners: Vec<Partner>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            partners: Vec::new(),
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn partners(&self) -> &[Partner] {
        &self.partners
    }

    /// Replaces the partner set with the output of a rebalancing step.
    pub(crate) fn replace_partners(&mut self, partners: Vec<Partner>) {
        self.partners = partners;
        self.touch();
    }

    pub fn partner(&self, id: Uuid) -> Option<&Partner> {
        self.partners.iter().find(|partner| partner.id() == id)
    }

    pub fn partner_by_name(&self, name: &str) -> Option<&Partner> {
        self.partners
            .iter()
            .find(|partner| names_match(partner.name(), name))
    }

    /// Records a transaction ahead of older ones.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.insert(0, transaction);
        self.touch();
        id
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn transactions_of_kind(&self, kind: TransactionKind) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .collect()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Checks data that did not come through the services, such as a snapshot
    /// read from disk: every partner and transaction is valid and partner names
    /// are unique ignoring case.
    pub fn validate(&self) -> Result<(), LedgerError> {
        for (idx, partner) in self.partners.iter().enumerate() {
            partner.validate()?;
            if self.partners[..idx]
                .iter()
                .any(|earlier| earlier.matches_name(partner.name()))
            {
                return Err(LedgerError::validation(format!(
                    "partner `{}` appears more than once",
                    partner.name()
                )));
            }
        }
        for txn in &self.transactions {
            txn.validate()?;
        }
        Ok(())
    }
}
