#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use once_cell::sync::Lazy;
use partner_ledger::{
    config::ConfigManager,
    core::equity::{add_partner, ZeroHintPolicy},
    domain::Partner,
};
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory and a config manager rooted in it.
pub fn setup_test_env() -> (PathBuf, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (base, config_manager)
}

/// Karan 40%, Prabee 40%, Garvit 20%, built through the rebalancer.
pub fn founders() -> Vec<Partner> {
    let mut partners = Vec::new();
    for (name, share) in [("Karan", 0.4), ("Prabee", 0.4), ("Garvit", 0.2)] {
        partners = add_partner(&partners, name, Some(share), ZeroHintPolicy::ResetEqual)
            .expect("founding partner fits the equity budget");
    }
    partners
}

pub fn id_of(partners: &[Partner], name: &str) -> Uuid {
    partners
        .iter()
        .find(|p| p.name() == name)
        .map(|p| p.id())
        .unwrap_or_else(|| panic!("no partner named {name}"))
}

pub fn equity_sum(partners: &[Partner]) -> f64 {
    partners.iter().map(|p| p.equity()).sum()
}

#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
