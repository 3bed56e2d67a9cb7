//! Conversion of string-encoded records exported by the earlier web app.
//!
//! Those records name partners instead of referencing them, pack partial
//! payments into the status label (`"Partial (₹15,000 Paid)"`) and join
//! co-payers with `+`. Everything is resolved here, once, into typed
//! [`Transaction`] values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    names_match, Ledger, Partner, Payers, PoolKind, Recipient, Transaction, TransactionKind,
    TransactionStatus,
};

const RUPEE: char = '₹';
const SUGGESTION_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPartner {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    pub equity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTransaction {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub paid_by: String,
    #[serde(default)]
    pub received_by: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacySnapshot {
    #[serde(default)]
    pub partners: Vec<LegacyPartner>,
    #[serde(default)]
    pub transactions: Vec<LegacyTransaction>,
}

/// Legacy ids were either numbers or strings.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl LegacySnapshot {
    /// Builds a ledger from the snapshot. Rows that fail validation are skipped.
    pub fn into_ledger(self, name: &str) -> Ledger {
        let mut ledger = Ledger::new(name);
        let mut partners: Vec<Partner> = Vec::with_capacity(self.partners.len());
        for legacy in &self.partners {
            let name = legacy.name.trim();
            if name.is_empty() || partners.iter().any(|p| p.matches_name(name)) {
                tracing::warn!(partner = %legacy.name, "skipping duplicate or unnamed partner");
                continue;
            }
            if !(legacy.equity > 0.0 && legacy.equity <= 1.0) {
                tracing::warn!(
                    partner = name,
                    equity = legacy.equity,
                    "skipping partner with invalid equity"
                );
                continue;
            }
            partners.push(Partner::new(name, legacy.equity));
        }
        ledger.replace_partners(partners);

        for legacy in self.transactions {
            let txn = legacy.to_transaction(ledger.partners());
            match txn.validate() {
                Ok(()) => ledger.transactions.push(txn),
                Err(err) => tracing::warn!(
                    transaction = %legacy.id,
                    error = %err,
                    "skipping invalid transaction"
                ),
            }
        }
        tracing::info!(
            partners = ledger.partners().len(),
            transactions = ledger.transactions.len(),
            "imported legacy snapshot"
        );
        ledger
    }
}

impl LegacyTransaction {
    pub fn to_transaction(&self, partners: &[Partner]) -> Transaction {
        let (status, amount_settled) = parse_status(&self.status, self.amount);
        let mut txn = Transaction::new(self.description.trim(), self.amount, self.kind)
            .with_status(status)
            .paid_by(resolve_payers(&self.paid_by, partners))
            .received_by(resolve_recipient(&self.received_by, partners))
            .with_notes(self.notes.trim());
        txn.amount_settled = amount_settled;
        if let Some(created_at) = self.created_at {
            txn.created_at = created_at;
        }
        txn
    }
}

/// Splits a legacy status label into a status and an optional settled amount.
///
/// Keywords are matched as whole words, so `"Unpaid"` and `"not paid"` stay
/// pending. A `₹` marker with no readable figure settles the full `amount`.
pub fn parse_status(label: &str, amount: f64) -> (TransactionStatus, Option<f64>) {
    let lowered = label.trim().to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();
    let has = |keyword: &str| {
        words
            .iter()
            .enumerate()
            .any(|(idx, word)| *word == keyword && (idx == 0 || words[idx - 1] != "not"))
    };

    let status = if has("partial") {
        TransactionStatus::Partial
    } else if has("paid") {
        TransactionStatus::Paid
    } else if has("received") {
        TransactionStatus::Received
    } else if has("overdue") {
        TransactionStatus::Overdue
    } else if has("due") {
        TransactionStatus::Due
    } else if words.iter().any(|w| w.starts_with("cancel")) {
        TransactionStatus::Cancelled
    } else {
        let negated = words.contains(&"unpaid") || words.contains(&"not");
        if !words.is_empty() && !has("pending") && !negated {
            tracing::warn!(status = label, "unknown status label, treating as pending");
        }
        TransactionStatus::Pending
    };

    let settled = match embedded_amount(label) {
        Some(figure) => Some(figure),
        None if label.contains(RUPEE) => {
            tracing::debug!(label, "no amount after currency marker, using full amount");
            Some(amount)
        }
        None => None,
    };
    (status, settled)
}

/// Reads the first `₹<digits>` figure from a label, ignoring thousands separators.
pub fn embedded_amount(label: &str) -> Option<f64> {
    let (_, rest) = label.split_once(RUPEE)?;
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| *c != ',')
        .collect();
    digits.parse::<f64>().ok()
}

pub fn resolve_payers(label: &str, partners: &[Partner]) -> Payers {
    let trimmed = label.trim();
    if trimmed.is_empty() || names_match(trimmed, "pending") {
        return Payers::Pending;
    }
    if names_match(trimmed, "all partners") {
        return Payers::AllPartners;
    }
    if names_match(trimmed, "business account") {
        return Payers::BusinessAccount;
    }
    let mut ids = Vec::new();
    for token in trimmed.split('+').map(str::trim).filter(|t| !t.is_empty()) {
        match resolve_name(token, partners) {
            Some(id) => ids.push(id),
            None => warn_unresolved(token, partners),
        }
    }
    if ids.is_empty() {
        Payers::External(trimmed.to_string())
    } else {
        Payers::Partners(ids)
    }
}

pub fn resolve_recipient(label: &str, partners: &[Partner]) -> Recipient {
    let trimmed = label.trim();
    for pool in [PoolKind::Team, PoolKind::BusinessAccount, PoolKind::AllPartners] {
        if names_match(trimmed, pool.label()) {
            return Recipient::Pool(pool);
        }
    }
    match partners.iter().find(|p| p.matches_name(trimmed)) {
        Some(partner) => Recipient::Partner(partner.id()),
        None => Recipient::External(trimmed.to_string()),
    }
}

/// Exact case-insensitive match first, then a single partner whose name is
/// contained in the token.
fn resolve_name(token: &str, partners: &[Partner]) -> Option<Uuid> {
    if let Some(partner) = partners.iter().find(|p| p.matches_name(token)) {
        return Some(partner.id());
    }
    let lowered = token.to_lowercase();
    let mut contained = partners
        .iter()
        .filter(|p| lowered.contains(&p.name().to_lowercase()));
    match (contained.next(), contained.next()) {
        (Some(partner), None) => Some(partner.id()),
        (Some(_), Some(_)) => {
            tracing::warn!(token, "payer name matches several partners");
            None
        }
        _ => None,
    }
}

fn warn_unresolved(token: &str, partners: &[Partner]) {
    let lowered = token.to_lowercase();
    let suggestion = partners
        .iter()
        .map(|p| {
            let score = strsim::jaro_winkler(&lowered, &p.name().to_lowercase());
            (p.name(), score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name);
    match suggestion {
        Some(name) => tracing::warn!(token, suggestion = name, "payer is not a partner"),
        None => tracing::warn!(token, "payer is not a partner"),
    }
}
