use crate::domain::model::{Brand, Product, ProductRef, Session};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn update_delay(&self) -> Duration;
}

/// Remote product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// `None` when the credentials are rejected.
    async fn login(&self, username: &str, password: &str) -> Result<Option<Session>>;

    async fn brand_products(&self, brand: &Brand) -> Result<Vec<ProductRef>>;

    /// `None` when the catalog has no product for `code`.
    async fn get_product(&self, code: &str) -> Result<Option<Product>>;

    /// `true` when the catalog accepted the change.
    async fn update_product(&self, product: &Product, session: &Session) -> Result<bool>;
}

/// Pause inserted after each committed update.
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self);
}
