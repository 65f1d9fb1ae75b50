pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FixedDelay, NoDelay, OpenFoodFactsClient};
pub use config::{BrandMapping, ServiceConfig};
pub use crate::core::corrector::{CorrectorEngine, RunState, RunSummary};
pub use crate::core::reconcile::{resolve_brand, Reconciler, Reconciliation};
pub use utils::error::{CorrectorError, Result};
