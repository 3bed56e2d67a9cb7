//! Calculation core: allocation, aggregation and equity rebalancing, plus the
//! validated services built on top of them.

pub mod allocation;
pub mod balances;
pub mod equity;
pub mod services;
pub mod utils;

pub use allocation::{allocate, PersonCalculation};
pub use balances::{aggregate, NetTone, PersonBalance};
pub use equity::{
    add_partner, check_equity, remove_partner, EquityCheck, ZeroHintPolicy, EQUITY_EPSILON,
};
