//! Equity redistribution when partners join or leave.
//!
//! These are the only operations that change a partner's equity. Both borrow the
//! current set and return a new one, so a rejected call leaves the caller's
//! partners untouched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{names_match, total_equity, Partner};
use crate::errors::LedgerError;

/// Tolerance used when comparing an equity total against one.
pub const EQUITY_EPSILON: f64 = 0.001;

/// How a new partner's share is carved out when no equity hint is given.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ZeroHintPolicy {
    /// Every partner, new and existing, is reset to `1 / (n + 1)`.
    #[default]
    ResetEqual,
    /// The new partner gets `1 / (n + 1)`; existing partners shrink proportionally.
    ShrinkProportional,
}

/// Result of comparing a partner set's equity total against one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EquityCheck {
    pub total: f64,
    pub remaining: f64,
    pub balanced: bool,
}

pub fn check_equity(partners: &[Partner], tolerance: f64) -> EquityCheck {
    let total = total_equity(partners);
    let balanced = (total - 1.0).abs() < tolerance;
    if !balanced && !partners.is_empty() {
        tracing::warn!(total, "partner equity does not sum to one");
    }
    EquityCheck {
        total,
        remaining: 1.0 - total,
        balanced,
    }
}

/// Adds a partner named `name`, rebalancing existing equity as needed.
pub fn add_partner(
    existing: &[Partner],
    name: &str,
    equity_hint: Option<f64>,
    policy: ZeroHintPolicy,
) -> Result<Vec<Partner>, LedgerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation("partner name is required"));
    }
    if existing.iter().any(|p| names_match(p.name(), name)) {
        return Err(LedgerError::validation(format!(
            "partner `{name}` already exists"
        )));
    }

    let hint = equity_hint.filter(|value| *value != 0.0);
    let current_total = total_equity(existing);

    let Some(hint) = hint else {
        let share = 1.0 / (existing.len() + 1) as f64;
        let mut partners: Vec<Partner> = match policy {
            ZeroHintPolicy::ResetEqual => existing.iter().map(|p| p.with_equity(share)).collect(),
            ZeroHintPolicy::ShrinkProportional => scale(existing, 1.0 - share, current_total),
        };
        partners.push(Partner::new(name, share));
        tracing::info!(partner = name, share, ?policy, "added partner with equal share");
        return Ok(partners);
    };

    if !hint.is_finite() || hint < 0.0 || hint > 1.0 {
        return Err(LedgerError::validation(format!(
            "equity must be between 0 and 1, got {hint}"
        )));
    }

    let mut partners = if current_total >= 1.0 - EQUITY_EPSILON {
        if !existing.is_empty() && hint >= 1.0 {
            return Err(LedgerError::validation(
                "equity of 1 would leave existing partners with nothing",
            ));
        }
        scale(existing, 1.0 - hint, current_total)
    } else if current_total + hint <= 1.0 + EQUITY_EPSILON {
        existing.to_vec()
    } else {
        return Err(LedgerError::EquityBudgetExceeded {
            remaining: 1.0 - current_total,
        });
    };
    partners.push(Partner::new(name, hint));
    tracing::info!(partner = name, equity = hint, "added partner");
    Ok(partners)
}

/// Removes the partner with `id` and hands its equity to the survivors in
/// proportion to what they already hold.
pub fn remove_partner(partners: &[Partner], id: Uuid) -> Result<Vec<Partner>, LedgerError> {
    let removed = partners
        .iter()
        .find(|p| p.id() == id)
        .ok_or(LedgerError::PartnerNotFound(id))?;
    let survivors: Vec<&Partner> = partners.iter().filter(|p| p.id() != id).collect();
    if survivors.is_empty() {
        tracing::info!(partner = removed.name(), "removed last partner");
        return Ok(Vec::new());
    }

    let removed_equity = removed.equity();
    let survivor_total: f64 = survivors.iter().map(|p| p.equity()).sum();
    let count = survivors.len() as f64;
    let rebalanced = survivors
        .into_iter()
        .map(|p| {
            let bonus = if survivor_total > f64::EPSILON {
                (p.equity() / survivor_total) * removed_equity
            } else {
                removed_equity / count
            };
            p.with_equity(p.equity() + bonus)
        })
        .collect();
    tracing::info!(
        partner = removed.name(),
        redistributed = removed_equity,
        "removed partner"
    );
    Ok(rebalanced)
}

/// Rescales every partner so that together they hold `target`.
fn scale(partners: &[Partner], target: f64, current_total: f64) -> Vec<Partner> {
    if current_total <= f64::EPSILON {
        return partners.to_vec();
    }
    let factor = target / current_total;
    partners
        .iter()
        .map(|p| p.with_equity(p.equity() * factor))
        .collect()
}
