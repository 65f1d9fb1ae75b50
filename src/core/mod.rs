pub mod corrector;
pub mod reconcile;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{Brand, Product, ProductRef, Session};
pub use crate::domain::ports::{Catalog, ConfigProvider, Throttle};
pub use crate::utils::error::Result;
