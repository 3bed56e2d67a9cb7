#![doc(test(attr(deny(warnings))))]

//! Partner Ledger splits a small business's expenses, receivables and payables
//! between its partners by equity share and derives each partner's net balance.

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod import;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Partner Ledger tracing initialized.");
    });
}
