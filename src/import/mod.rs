//! Boundary adapters that turn externally stored records into ledger types.

pub mod legacy;

pub use legacy::{LegacyPartner, LegacySnapshot, LegacyTransaction};
