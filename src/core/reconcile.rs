use crate::domain::model::{Brand, Product, ProductRef};
use crate::domain::ports::Catalog;
use crate::utils::error::{CorrectorError, Result};
use crate::utils::slug::slug;
use std::collections::HashSet;

/// Catalog URL of the brand listing for `name`.
pub fn brand_url(base_url: &str, name: &str) -> String {
    format!("{}/brand/{}", base_url.trim_end_matches('/'), slug(name))
}

/// Build a brand reference without touching the network.
///
/// Whether the brand exists is only known once its products are listed.
pub fn resolve_brand(base_url: &str, name: &str) -> Result<Brand> {
    if name.trim().is_empty() {
        return Err(CorrectorError::ValidationError {
            message: "brand name cannot be empty".to_string(),
        });
    }

    Ok(Brand {
        name: name.to_string(),
        url: brand_url(base_url, name),
    })
}

/// Outcome of one child/mother comparison.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub child: Brand,
    pub mother: Brand,
    pub child_product_count: usize,
    /// Child products missing from the mother listing, in listing order.
    pub to_check: Vec<ProductRef>,
    /// Full records with the mother brand appended, not yet saved.
    pub products: Vec<Product>,
}

impl Reconciliation {
    /// Share of child products to check, in percent rounded to two decimals.
    /// `None` when the child brand lists no product.
    pub fn ratio(&self) -> Option<f64> {
        if self.child_product_count == 0 {
            return None;
        }
        let percent = self.to_check.len() as f64 / self.child_product_count as f64 * 100.0;
        Some((percent * 100.0).round() / 100.0)
    }

    pub fn report_lines(&self) -> Vec<String> {
        vec![
            "- *** REPORT ***".to_string(),
            format!("- {} @ {}", self.child.name, self.mother.name),
            format!("- {} child brand product(s) found", self.child_product_count),
            format!("- {} product(s) to check", self.to_check.len()),
            format!("- {}% products ratio to check", format_ratio(self.ratio())),
            "- **************".to_string(),
        ]
    }
}

/// Whole percentages keep one decimal (`50.0`); undefined ratios print `N/A`.
pub fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        None => "N/A".to_string(),
        Some(r) if r.fract() == 0.0 => format!("{:.1}", r),
        Some(r) => format!("{}", r),
    }
}

/// Compares child and mother brand listings against one catalog.
pub struct Reconciler<'a, C: Catalog> {
    catalog: &'a C,
    base_url: &'a str,
}

impl<'a, C: Catalog> Reconciler<'a, C> {
    pub fn new(catalog: &'a C, base_url: &'a str) -> Self {
        Self { catalog, base_url }
    }

    pub fn resolve_brand(&self, name: &str) -> Result<Brand> {
        resolve_brand(self.base_url, name)
    }

    /// Stage the mother brand on every child product the mother does not list yet.
    pub async fn reconcile(&self, child_name: &str, mother_name: &str) -> Result<Reconciliation> {
        let child = self.resolve_brand(child_name)?;
        let mother = self.resolve_brand(mother_name)?;

        let mother_codes: HashSet<String> = self
            .catalog
            .brand_products(&mother)
            .await?
            .into_iter()
            .map(|p| p.code)
            .collect();

        let child_products = self.catalog.brand_products(&child).await?;
        let child_product_count = child_products.len();

        let to_check: Vec<ProductRef> = child_products
            .into_iter()
            .filter(|p| !mother_codes.contains(&p.code))
            .collect();

        tracing::info!(
            "{} @ {}: {} of {} child product(s) missing the mother brand",
            child.name,
            mother.name,
            to_check.len(),
            child_product_count
        );

        let mut products = Vec::with_capacity(to_check.len());
        for product_ref in &to_check {
            let Some(mut product) = self.catalog.get_product(&product_ref.code).await? else {
                tracing::warn!("Product {} listed but not found, skipping", product_ref.code);
                continue;
            };

            println!("- *******");
            println!("- Product {} : {}", product.code, product.product_name);
            println!("- Web: {} - API: {}", product.weburl, product.url);

            let old_brands = product.brands.clone();
            product.append_brand(&mother.name);
            println!(
                "> UPDATE brands FROM \"{}\" TO \"{}\"",
                old_brands, product.brands
            );

            products.push(product);
        }

        let reconciliation = Reconciliation {
            child,
            mother,
            child_product_count,
            to_check,
            products,
        };

        for line in reconciliation.report_lines() {
            println!("{}", line);
        }

        Ok(reconciliation)
    }
}
