mod common;

use common::{assert_close, id_of};
use partner_ledger::{
    core::aggregate,
    domain::{Ledger, Payers, PoolKind, Recipient, TransactionKind, TransactionStatus},
    import::LegacySnapshot,
};

const SNAPSHOT: &str = r#"{
  "partners": [
    { "id": 1, "name": "Karan", "equity": 0.4 },
    { "id": 2, "name": "Prabee", "equity": 0.4 },
    { "id": "3", "name": "Garvit", "equity": 0.2 }
  ],
  "transactions": [
    {
      "id": 101,
      "description": "Client retainer",
      "amount": 10000,
      "type": "Receivable",
      "status": "Partial (₹4,000 Paid)",
      "receivedBy": "Business Account"
    },
    {
      "id": 102,
      "description": "Coworking desks",
      "amount": 2000,
      "type": "Expense",
      "status": "Paid",
      "paidBy": "Karan + Prabee",
      "notes": "  March  "
    },
    {
      "id": 103,
      "description": "Printer",
      "amount": 900,
      "type": "Expense",
      "status": "Paid",
      "paidBy": "Garvit + Pradeep"
    },
    {
      "id": 104,
      "description": "Design work",
      "amount": 5000,
      "type": "Receivable",
      "status": "Partial (₹ Paid)",
      "receivedBy": "Garvit"
    },
    {
      "id": 105,
      "description": "Broken row",
      "amount": -10,
      "type": "Payable",
      "status": "Due"
    },
    {
      "id": 106,
      "description": "Pilot project",
      "amount": 10000,
      "type": "Receivable",
      "status": "Partial",
      "receivedBy": "Business Account"
    },
    {
      "id": 107,
      "description": "Festival booth",
      "amount": 10000,
      "type": "Receivable",
      "status": "Unpaid",
      "receivedBy": "Team"
    },
    {
      "id": 108,
      "description": "Van hire",
      "amount": 5000,
      "type": "Expense",
      "status": "Partial",
      "paidBy": "Garvit"
    }
  ]
}"#;

fn import() -> Ledger {
    let snapshot: LegacySnapshot = serde_json::from_str(SNAPSHOT).expect("snapshot parses");
    snapshot.into_ledger("Imported")
}

#[test]
fn partners_and_valid_rows_are_imported() {
    let ledger = import();
    assert_eq!(ledger.partners().len(), 3);
    assert_eq!(ledger.transactions.len(), 7);
    assert!(ledger
        .transactions
        .iter()
        .all(|t| t.description != "Broken row"));
}

#[test]
fn partial_status_becomes_status_plus_settled_amount() {
    let ledger = import();
    let retainer = &ledger.transactions[0];
    assert_eq!(retainer.kind, TransactionKind::Receivable);
    assert_eq!(retainer.status, TransactionStatus::Partial);
    assert_eq!(retainer.amount_settled, Some(4_000.0));
    assert_eq!(
        retainer.received_by,
        Recipient::Pool(PoolKind::BusinessAccount)
    );

    let balances = aggregate(&ledger.transactions[..1], ledger.partners());
    let partners = ledger.partners();
    assert_close(balances[&id_of(partners, "Karan")].receivables, 1_600.0);
    assert_close(balances[&id_of(partners, "Prabee")].receivables, 1_600.0);
    assert_close(balances[&id_of(partners, "Garvit")].receivables, 800.0);
}

#[test]
fn joined_payers_resolve_to_partner_ids() {
    let ledger = import();
    let partners = ledger.partners();
    let desks = &ledger.transactions[1];
    assert_eq!(
        desks.paid_by,
        Payers::Partners(vec![id_of(partners, "Karan"), id_of(partners, "Prabee")])
    );
    assert_eq!(desks.notes, "March");

    let balances = aggregate(std::slice::from_ref(desks), partners);
    assert_close(balances[&id_of(partners, "Karan")].paid, 1_000.0);
    assert_close(balances[&id_of(partners, "Prabee")].paid, 1_000.0);
}

#[test]
fn unknown_co_payer_is_dropped() {
    let ledger = import();
    let partners = ledger.partners();
    let printer = &ledger.transactions[2];
    assert_eq!(
        printer.paid_by,
        Payers::Partners(vec![id_of(partners, "Garvit")])
    );

    let balances = aggregate(std::slice::from_ref(printer), partners);
    assert_close(balances[&id_of(partners, "Garvit")].paid, 900.0);
}

#[test]
fn currency_marker_without_figure_settles_full_amount() {
    let ledger = import();
    let partners = ledger.partners();
    let design = &ledger.transactions[3];
    assert_eq!(design.amount_settled, Some(5_000.0));
    assert_eq!(
        design.received_by,
        Recipient::Partner(id_of(partners, "Garvit"))
    );
    assert_close(design.received_amount(), 5_000.0);
}

#[test]
fn bare_partial_receivable_has_received_nothing() {
    let ledger = import();
    let pilot = &ledger.transactions[4];
    assert_eq!(pilot.status, TransactionStatus::Partial);
    assert_eq!(pilot.amount_settled, None);

    let balances = aggregate(std::slice::from_ref(pilot), ledger.partners());
    assert!(balances.values().all(|b| b.receivables == 0.0));
}

#[test]
fn unpaid_label_is_not_treated_as_paid() {
    let ledger = import();
    let booth = &ledger.transactions[5];
    assert_eq!(booth.status, TransactionStatus::Pending);

    let balances = aggregate(std::slice::from_ref(booth), ledger.partners());
    assert!(balances.values().all(|b| b.total_net == 0.0));
}

#[test]
fn bare_partial_expense_carries_no_liability() {
    let ledger = import();
    let partners = ledger.partners();
    let van = &ledger.transactions[6];
    assert!(!van.counts_as_paid());

    let balances = aggregate(std::slice::from_ref(van), partners);
    assert_close(balances[&id_of(partners, "Karan")].liability, 0.0);
    assert_close(balances[&id_of(partners, "Garvit")].paid, 5_000.0);
}
