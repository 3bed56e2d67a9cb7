use uuid::Uuid;

use crate::core::equity::{self, EquityCheck, ZeroHintPolicy};
use crate::domain::{Ledger, Partner};
use crate::errors::LedgerError;

use super::{ServiceError, ServiceResult};

pub struct PartnerService;

impl PartnerService {
    /// Adds a partner through the rebalancer and returns its identifier.
    pub fn add(
        ledger: &mut Ledger,
        name: &str,
        equity_hint: Option<f64>,
        policy: ZeroHintPolicy,
    ) -> ServiceResult<Uuid> {
        let partners = equity::add_partner(ledger.partners(), name, equity_hint, policy)?;
        let id = partners
            .last()
            .map(Partner::id)
            .ok_or_else(|| ServiceError::Invalid("Partner was not added".into()))?;
        ledger.replace_partners(partners);
        Ok(id)
    }

    /// Removes a partner, redistributing its equity to the survivors.
    ///
    /// Transactions that still reference the partner are kept as they are.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<Partner> {
        let partners = equity::remove_partner(ledger.partners(), id)?;
        let removed = ledger
            .partner(id)
            .cloned()
            .ok_or(LedgerError::PartnerNotFound(id))?;
        ledger.replace_partners(partners);
        Ok(removed)
    }

    pub fn remove_by_name(ledger: &mut Ledger, name: &str) -> ServiceResult<Partner> {
        let id = ledger
            .partner_by_name(name)
            .map(Partner::id)
            .ok_or_else(|| ServiceError::Invalid(format!("Partner `{}` not found", name)))?;
        Self::remove(ledger, id)
    }

    pub fn list(ledger: &Ledger) -> &[Partner] {
        ledger.partners()
    }

    pub fn equity_check(ledger: &Ledger, tolerance: f64) -> EquityCheck {
        equity::check_equity(ledger.partners(), tolerance)
    }
}
