//! Per-transaction, per-partner financial effect.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Partner, Recipient, Transaction, TransactionKind};

/// What a single transaction means for a single partner.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonCalculation {
    pub liability: f64,
    pub payment: f64,
    pub receivable: f64,
    pub net: f64,
}

impl PersonCalculation {
    fn from_parts(liability: f64, payment: f64, receivable: f64) -> Self {
        Self {
            liability,
            payment,
            receivable,
            net: payment + receivable - liability,
        }
    }
}

/// Computes the liability, payment and receivable a transaction assigns to one partner.
///
/// Returns an all-zero calculation when `partner_id` is not part of `partners`.
pub fn allocate(
    transaction: &Transaction,
    partner_id: Uuid,
    partners: &[Partner],
) -> PersonCalculation {
    let Some(partner) = partners.iter().find(|p| p.id() == partner_id) else {
        return PersonCalculation::default();
    };
    let equity_share = transaction.amount * partner.equity();

    match transaction.kind {
        TransactionKind::Expense => {
            let liability = if transaction.counts_as_paid() {
                equity_share
            } else {
                0.0
            };
            let payment = payment_share(transaction, partner, partners);
            PersonCalculation::from_parts(liability, payment, 0.0)
        }
        TransactionKind::Receivable => {
            let received = transaction.received_amount();
            let receivable = match transaction.received_by {
                Recipient::Pool(_) => received * partner.equity(),
                Recipient::Partner(id) if id == partner.id() => received,
                _ => 0.0,
            };
            PersonCalculation::from_parts(0.0, 0.0, receivable)
        }
        TransactionKind::Payable => {
            let payment = if transaction.counts_as_paid() {
                payment_share(transaction, partner, partners)
            } else {
                0.0
            };
            PersonCalculation::from_parts(equity_share, payment, 0.0)
        }
    }
}

/// Equal split of the amount among the distinct credited payers.
fn payment_share(transaction: &Transaction, partner: &Partner, partners: &[Partner]) -> f64 {
    let credited = transaction.paid_by.credited(partners);
    if !credited.contains(&partner.id()) {
        return 0.0;
    }
    transaction.amount / credited.len().max(1) as f64
}
