//! Market observations, trend classification and the static dataset registry.

pub mod observation;
pub mod registry;

pub use observation::{format_decimal, Observation, Reference, Trend};
pub use registry::{get_dataset, settlement_contracts, SettlementContract, TabId};
