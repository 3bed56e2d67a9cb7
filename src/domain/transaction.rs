use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::partner::Partner;
use crate::errors::LedgerError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Expense,
    Receivable,
    Payable,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Receivable => "Receivable",
            TransactionKind::Payable => "Payable",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Paid,
    Partial,
    Received,
    Due,
    Overdue,
    Cancelled,
}

impl TransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Paid => "Paid",
            TransactionStatus::Partial => "Partial",
            TransactionStatus::Received => "Received",
            TransactionStatus::Due => "Due",
            TransactionStatus::Overdue => "Overdue",
            TransactionStatus::Cancelled => "Cancelled",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            TransactionStatus::Paid | TransactionStatus::Received => StatusTone::Settled,
            TransactionStatus::Partial => StatusTone::Partial,
            TransactionStatus::Overdue => StatusTone::Overdue,
            TransactionStatus::Cancelled => StatusTone::Cancelled,
            TransactionStatus::Pending | TransactionStatus::Due => StatusTone::Open,
        }
    }
}

/// Presentation hint for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Settled,
    Partial,
    Overdue,
    Cancelled,
    Open,
}

/// Collective targets that stand for the business as a whole.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PoolKind {
    Team,
    BusinessAccount,
    AllPartners,
}

impl PoolKind {
    pub fn label(&self) -> &'static str {
        match self {
            PoolKind::Team => "Team",
            PoolKind::BusinessAccount => "Business Account",
            PoolKind::AllPartners => "All Partners",
        }
    }
}

/// Who put money into a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum Payers {
    #[default]
    Pending,
    BusinessAccount,
    AllPartners,
    Partners(Vec<Uuid>),
    External(String),
}

impl Payers {
    pub fn single(partner_id: Uuid) -> Self {
        Payers::Partners(vec![partner_id])
    }

    /// Distinct partner ids credited with a payment, in first-seen order.
    ///
    /// `AllPartners` expands to every partner in `partners`; listed ids are kept even
    /// when the partner no longer exists so the split still reflects who paid.
    pub fn credited(&self, partners: &[Partner]) -> Vec<Uuid> {
        match self {
            Payers::AllPartners => partners.iter().map(Partner::id).collect(),
            Payers::Partners(ids) => {
                let mut seen = Vec::with_capacity(ids.len());
                for id in ids {
                    if !seen.contains(id) {
                        seen.push(*id);
                    }
                }
                seen
            }
            Payers::Pending | Payers::BusinessAccount | Payers::External(_) => Vec::new(),
        }
    }
}

/// Who money flowed to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Recipient {
    Pool(PoolKind),
    Partner(Uuid),
    External(String),
}

impl Default for Recipient {
    fn default() -> Self {
        Recipient::Pool(PoolKind::BusinessAccount)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_settled: Option<f64>,
    #[serde(default)]
    pub paid_by: Payers,
    #[serde(default)]
    pub received_by: Recipient,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(description: impl Into<String>, amount: f64, kind: TransactionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            kind,
            status: TransactionStatus::Pending,
            amount_settled: None,
            paid_by: Payers::Pending,
            received_by: Recipient::default(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_settled(mut self, amount_settled: f64) -> Self {
        self.amount_settled = Some(amount_settled);
        self
    }

    pub fn paid_by(mut self, payers: Payers) -> Self {
        self.paid_by = payers;
        self
    }

    pub fn received_by(mut self, recipient: Recipient) -> Self {
        self.received_by = recipient;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Money actually received so far.
    ///
    /// An explicit settled amount wins. Without one, only `Paid` and `Received`
    /// count the full amount; a bare `Partial` has nothing recorded yet.
    pub fn received_amount(&self) -> f64 {
        if let Some(settled) = self.amount_settled {
            return settled;
        }
        match self.status {
            TransactionStatus::Paid | TransactionStatus::Received => self.amount,
            _ => 0.0,
        }
    }

    /// Whether money has gone out for this transaction: `Paid`, or `Partial`
    /// with a recorded settled amount.
    pub fn counts_as_paid(&self) -> bool {
        match self.status {
            TransactionStatus::Paid => true,
            TransactionStatus::Partial => self.amount_settled.is_some(),
            _ => false,
        }
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        validate_description(&self.description)?;
        validate_amount(self.amount)?;
        if let Some(settled) = self.amount_settled {
            validate_settled(settled, self.amount)?;
        }
        Ok(())
    }

    /// Applies a single-field edit. Only the edited field is validated.
    pub fn apply(&mut self, patch: TransactionPatch) -> Result<(), LedgerError> {
        match patch {
            TransactionPatch::Description(description) => {
                validate_description(&description)?;
                self.description = description.trim().to_string();
            }
            TransactionPatch::Amount(amount) => {
                validate_amount(amount)?;
                self.amount = amount;
            }
            TransactionPatch::Kind(kind) => self.kind = kind,
            TransactionPatch::Status(status) => self.status = status,
            TransactionPatch::AmountSettled(settled) => {
                if let Some(value) = settled {
                    if !value.is_finite() || value < 0.0 {
                        return Err(LedgerError::validation(
                            "settled amount must be a non-negative number",
                        ));
                    }
                }
                self.amount_settled = settled;
            }
            TransactionPatch::PaidBy(payers) => self.paid_by = payers,
            TransactionPatch::ReceivedBy(recipient) => self.received_by = recipient,
            TransactionPatch::Notes(notes) => self.notes = notes.trim().to_string(),
        }
        Ok(())
    }
}

/// One in-place edit of a transaction field.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionPatch {
    Description(String),
    Amount(f64),
    Kind(TransactionKind),
    Status(TransactionStatus),
    AmountSettled(Option<f64>),
    PaidBy(Payers),
    ReceivedBy(Recipient),
    Notes(String),
}

fn validate_description(description: &str) -> Result<(), LedgerError> {
    if description.trim().is_empty() {
        return Err(LedgerError::validation("description is required"));
    }
    Ok(())
}

fn validate_amount(amount: f64) -> Result<(), LedgerError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::validation(
            "amount must be a number greater than 0",
        ));
    }
    Ok(())
}

fn validate_settled(settled: f64, amount: f64) -> Result<(), LedgerError> {
    if !settled.is_finite() || settled < 0.0 || settled > amount {
        return Err(LedgerError::validation(format!(
            "settled amount {settled} must be between 0 and {amount}"
        )));
    }
    Ok(())
}
