//! Folding per-transaction allocations into running partner balances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::allocation::{allocate, PersonCalculation};
use crate::domain::{Partner, Transaction};

/// Running totals for one partner across a set of transactions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonBalance {
    pub paid: f64,
    pub liability: f64,
    pub receivables: f64,
    pub total_net: f64,
}

impl PersonBalance {
    fn absorb(&mut self, calc: &PersonCalculation) {
        self.paid += calc.payment;
        self.liability += calc.liability;
        self.receivables += calc.receivable;
        self.total_net += calc.net;
    }

    pub fn tone(&self) -> NetTone {
        NetTone::of(self.total_net)
    }
}

/// Whether a partner should receive money, pay money, or is square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetTone {
    Receive,
    Pay,
    Even,
}

impl NetTone {
    pub fn of(value: f64) -> Self {
        if value > f64::EPSILON {
            NetTone::Receive
        } else if value < -f64::EPSILON {
            NetTone::Pay
        } else {
            NetTone::Even
        }
    }
}

/// Folds every (transaction, partner) allocation into per-partner totals.
///
/// Each call starts from zero. Transactions are visited in id order so the
/// floating point sums do not depend on the order of `transactions`.
pub fn aggregate(
    transactions: &[Transaction],
    partners: &[Partner],
) -> BTreeMap<Uuid, PersonBalance> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.amount.total_cmp(&b.amount)));

    let mut balances = BTreeMap::new();
    for partner in partners {
        let mut balance = PersonBalance::default();
        for txn in &ordered {
            balance.absorb(&allocate(txn, partner.id(), partners));
        }
        balances.insert(partner.id(), balance);
    }
    tracing::debug!(
        partners = partners.len(),
        transactions = transactions.len(),
        "aggregated partner balances"
    );
    balances
}
