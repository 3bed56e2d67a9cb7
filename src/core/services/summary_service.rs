use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::allocation::allocate;
use crate::core::balances::{aggregate, PersonBalance};
use crate::core::equity::{check_equity, EquityCheck};
use crate::domain::{Ledger, Transaction, TransactionKind};

/// Gross amounts recorded per transaction kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct KindTotals {
    pub expense: f64,
    pub receivable: f64,
    pub payable: f64,
}

/// A partner's net position split by transaction kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartnerBreakdown {
    pub partner_id: Uuid,
    pub name: String,
    pub equity: f64,
    pub expense_net: f64,
    pub receivable_net: f64,
    pub payable_liability: f64,
    pub payable_payment: f64,
    pub net_balance: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn balances(ledger: &Ledger) -> BTreeMap<Uuid, PersonBalance> {
        aggregate(&ledger.transactions, ledger.partners())
    }

    pub fn totals_by_kind(transactions: &[Transaction]) -> KindTotals {
        transactions
            .iter()
            .fold(KindTotals::default(), |mut totals, txn| {
                match txn.kind {
                    TransactionKind::Expense => totals.expense += txn.amount,
                    TransactionKind::Receivable => totals.receivable += txn.amount,
                    TransactionKind::Payable => totals.payable += txn.amount,
                }
                totals
            })
    }

    /// Per-partner results table, in partner order.
    ///
    /// `net_balance` matches the aggregated `total_net` for the same partner.
    pub fn partner_breakdown(ledger: &Ledger) -> Vec<PartnerBreakdown> {
        let partners = ledger.partners();
        partners
            .iter()
            .map(|partner| {
                let mut row = PartnerBreakdown {
                    partner_id: partner.id(),
                    name: partner.name().to_string(),
                    equity: partner.equity(),
                    expense_net: 0.0,
                    receivable_net: 0.0,
                    payable_liability: 0.0,
                    payable_payment: 0.0,
                    net_balance: 0.0,
                };
                for txn in &ledger.transactions {
                    let calc = allocate(txn, partner.id(), partners);
                    match txn.kind {
                        TransactionKind::Expense => row.expense_net += calc.net,
                        TransactionKind::Receivable => row.receivable_net += calc.net,
                        TransactionKind::Payable => {
                            row.payable_liability += calc.liability;
                            row.payable_payment += calc.payment;
                        }
                    }
                }
                row.net_balance = row.expense_net + row.receivable_net + row.payable_payment
                    - row.payable_liability;
                row
            })
            .collect()
    }

    pub fn equity_check(ledger: &Ledger, tolerance: f64) -> EquityCheck {
        check_equity(ledger.partners(), tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::equity::ZeroHintPolicy;
    use crate::core::services::{PartnerService, TransactionService};
    use crate::domain::{Payers, PoolKind, Recipient, TransactionStatus};

    fn ledger_with_activity() -> Ledger {
        let mut ledger = Ledger::new("Summary");
        let a = PartnerService::add(&mut ledger, "A", Some(0.5), ZeroHintPolicy::ResetEqual)
            .unwrap();
        PartnerService::add(&mut ledger, "B", Some(0.5), ZeroHintPolicy::ResetEqual).unwrap();
        TransactionService::add(
            &mut ledger,
            Transaction::new("Ads", 1_000.0, TransactionKind::Expense)
                .with_status(TransactionStatus::Paid)
                .paid_by(Payers::single(a)),
        )
        .unwrap();
        TransactionService::add(
            &mut ledger,
            Transaction::new("Client", 4_000.0, TransactionKind::Receivable)
                .with_status(TransactionStatus::Received)
                .received_by(Recipient::Pool(PoolKind::Team)),
        )
        .unwrap();
        TransactionService::add(
            &mut ledger,
            Transaction::new("Designer", 600.0, TransactionKind::Payable),
        )
        .unwrap();
        ledger
    }

    #[test]
    fn totals_by_kind_sums_gross_amounts() {
        let ledger = ledger_with_activity();
        let totals = SummaryService::totals_by_kind(&ledger.transactions);
        assert_eq!(
            totals,
            KindTotals {
                expense: 1_000.0,
                receivable: 4_000.0,
                payable: 600.0,
            }
        );
    }

    #[test]
    fn breakdown_agrees_with_aggregated_balances() {
        let ledger = ledger_with_activity();
        let balances = SummaryService::balances(&ledger);
        let rows = SummaryService::partner_breakdown(&ledger);
        assert_eq!(rows.len(), 2);
        for row in rows {
            let balance = balances[&row.partner_id];
            assert!((row.net_balance - balance.total_net).abs() < 1e-9);
        }
    }

    #[test]
    fn breakdown_splits_by_kind() {
        let ledger = ledger_with_activity();
        let rows = SummaryService::partner_breakdown(&ledger);
        let a = &rows[0];
        assert_eq!(a.name, "A");
        assert_eq!(a.expense_net, 500.0);
        assert_eq!(a.receivable_net, 2_000.0);
        assert_eq!(a.payable_liability, 300.0);
        assert_eq!(a.net_balance, 2_200.0);
    }
}
