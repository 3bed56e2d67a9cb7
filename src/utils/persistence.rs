use std::{fs, path::Path};

use crate::{
    core::{
        equity::{check_equity, EQUITY_EPSILON},
        utils::ensure_dir,
    },
    domain::Ledger,
    errors::LedgerError,
    import::LegacySnapshot,
};

/// Writes the provided ledger to disk atomically by staging to a temporary file.
pub fn save_ledger_to_file(ledger: &Ledger, path: &Path) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(ledger)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    tracing::debug!(path = %path.display(), "ledger saved");
    Ok(())
}

/// Loads a ledger snapshot from disk, returning structured errors on failure.
///
/// Snapshots with invalid partners or transactions are rejected; an equity
/// total away from one is only logged.
pub fn load_ledger_from_file(path: &Path) -> Result<Ledger, LedgerError> {
    let data = fs::read_to_string(path)?;
    let ledger: Ledger = serde_json::from_str(&data)?;
    ledger.validate()?;
    check_equity(ledger.partners(), EQUITY_EPSILON);
    Ok(ledger)
}

/// Reads an export of the older string-encoded record format.
pub fn load_legacy_snapshot(path: &Path) -> Result<LegacySnapshot, LedgerError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Transaction, TransactionKind};
    use tempfile::tempdir;

    #[test]
    fn roundtrip_preserves_transactions() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("books").join("studio.json");
        let mut ledger = Ledger::new("Studio");
        ledger.add_transaction(Transaction::new("Rent", 100.0, TransactionKind::Expense));

        save_ledger_to_file(&ledger, &path).unwrap();
        let loaded = load_ledger_from_file(&path).unwrap();
        assert_eq!(loaded.name, "Studio");
        assert_eq!(loaded.transactions, ledger.transactions);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_serde_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_ledger_from_file(&path),
            Err(LedgerError::Serde(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = tempdir().unwrap();
        assert!(matches!(
            load_ledger_from_file(&temp.path().join("nope.json")),
            Err(LedgerError::Io(_))
        ));
    }
}
