use crate::domain::model::{Brand, Product, ProductRef, Session};
use crate::domain::ports::{Catalog, Throttle};
use crate::utils::error::{CorrectorError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory catalog keyed by brand name.
#[derive(Default)]
pub struct MemoryCatalog {
    credentials: Option<(String, String)>,
    brands: HashMap<String, Vec<String>>,
    products: HashMap<String, Product>,
    rejected_updates: HashSet<String>,
    broken_updates: HashSet<String>,
    listing_calls: AtomicUsize,
    updates: Mutex<Vec<Product>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some((username.to_string(), password.to_string()));
        self
    }

    pub fn with_brand(mut self, name: &str, codes: &[&str]) -> Self {
        self.brands
            .insert(name.to_string(), codes.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_product(mut self, code: &str, name: &str, brands: &str) -> Self {
        self.products.insert(
            code.to_string(),
            Product {
                code: code.to_string(),
                product_name: name.to_string(),
                brands: brands.to_string(),
                weburl: format!("http://catalog.test/product/{}", code),
                url: format!("http://catalog.test/api/v0/product/{}.json", code),
            },
        );
        self
    }

    /// The catalog answers "not saved" for this code.
    pub fn rejecting_update(mut self, code: &str) -> Self {
        self.rejected_updates.insert(code.to_string());
        self
    }

    /// The update request itself fails for this code.
    pub fn failing_update(mut self, code: &str) -> Self {
        self.broken_updates.insert(code.to_string());
        self
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> Vec<Product> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn login(&self, username: &str, password: &str) -> Result<Option<Session>> {
        let accepted = matches!(&self.credentials, Some((u, p)) if u == username && p == password);
        Ok(accepted.then(|| Session {
            user_id: username.to_string(),
            password: password.to_string(),
        }))
    }

    async fn brand_products(&self, brand: &Brand) -> Result<Vec<ProductRef>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .brands
            .get(&brand.name)
            .map(|codes| {
                codes
                    .iter()
                    .map(|code| ProductRef { code: code.clone() })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_product(&self, code: &str) -> Result<Option<Product>> {
        Ok(self.products.get(code).cloned())
    }

    async fn update_product(&self, product: &Product, _session: &Session) -> Result<bool> {
        self.updates.lock().unwrap().push(product.clone());
        if self.broken_updates.contains(&product.code) {
            return Err(CorrectorError::UnexpectedStatus {
                status: 502,
                url: product.url.clone(),
            });
        }
        Ok(!self.rejected_updates.contains(&product.code))
    }
}

/// Throttle that only counts its pauses.
#[derive(Default)]
pub struct CountingThrottle {
    pauses: AtomicUsize,
}

impl CountingThrottle {
    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Throttle for CountingThrottle {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}
