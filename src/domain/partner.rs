use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::names_match;
use crate::errors::LedgerError;

/// A business partner holding a fractional equity share.
///
/// Equity is read-only outside the crate: the only way to change it is through
/// [`crate::core::equity::add_partner`] and [`crate::core::equity::remove_partner`],
/// which keep the partner set summing to one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Partner {
    id: Uuid,
    name: String,
    equity: f64,
}

impl Partner {
    pub(crate) fn new(name: impl Into<String>, equity: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            equity,
        }
    }

    pub(crate) fn with_equity(&self, equity: f64) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            equity,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn equity(&self) -> f64 {
        self.equity
    }

    pub fn matches_name(&self, candidate: &str) -> bool {
        names_match(&self.name, candidate)
    }

    /// Checks a partner read from outside the rebalancer.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::validation("partner name is required"));
        }
        if !self.equity.is_finite() || self.equity <= 0.0 || self.equity > 1.0 {
            return Err(LedgerError::validation(format!(
                "partner `{}` has equity {} outside (0, 1]",
                self.name, self.equity
            )));
        }
        Ok(())
    }
}

/// Sum of equity over a partner set.
pub fn total_equity(partners: &[Partner]) -> f64 {
    partners.iter().map(Partner::equity).sum()
}
