use crate::config::BrandMapping;
use crate::core::reconcile::Reconciler;
use crate::domain::model::{Product, Session};
use crate::domain::ports::{Catalog, Throttle};
use crate::utils::error::{CorrectorError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    LoggedOut,
    LoggedIn,
    Processing,
    Done,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Debug mode: printed, nothing sent.
    Reported,
    Updated,
    Rejected,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pairs: usize,
    pub staged: usize,
    pub reported: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Walks the brand mapping and commits (or reports) the staged brand updates.
pub struct CorrectorEngine<C: Catalog, T: Throttle> {
    catalog: C,
    throttle: T,
    mapping: BrandMapping,
    base_url: String,
    debug: bool,
    state: RunState,
}

impl<C: Catalog, T: Throttle> CorrectorEngine<C, T> {
    pub fn new(
        catalog: C,
        throttle: T,
        mapping: BrandMapping,
        base_url: impl Into<String>,
        debug: bool,
    ) -> Self {
        Self {
            catalog,
            throttle,
            mapping,
            base_url: base_url.into(),
            debug,
            state: RunState::LoggedOut,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn throttle(&self) -> &T {
        &self.throttle
    }

    pub async fn run(&mut self, username: &str, password: &str) -> Result<RunSummary> {
        println!(
            "With DEBUG {}",
            if self.debug { "Enabled" } else { "Disabled" }
        );
        if !self.debug {
            println!("/!\\ /!\\ /!\\");
        }

        match self.process(username, password).await {
            Ok(summary) => {
                self.state = RunState::Done;
                tracing::info!(
                    "Run finished: {} pair(s), {} staged, {} reported, {} updated, {} failed",
                    summary.pairs,
                    summary.staged,
                    summary.reported,
                    summary.updated,
                    summary.failed
                );
                Ok(summary)
            }
            Err(e) => {
                self.state = RunState::Failed;
                Err(e)
            }
        }
    }

    async fn process(&mut self, username: &str, password: &str) -> Result<RunSummary> {
        self.mapping.validate()?;
        validate_non_empty_string("username", username)?;
        validate_non_empty_string("password", password)?;

        let session = self
            .catalog
            .login(username, password)
            .await?
            .ok_or(CorrectorError::NotLoggedIn)?;
        self.state = RunState::LoggedIn;
        tracing::debug!("Logged in as {}", session.user_id);

        self.state = RunState::Processing;
        let mut summary = RunSummary::default();

        let pairs: Vec<(String, String)> = self
            .mapping
            .pairs()
            .map(|(mother, child)| (mother.to_string(), child.to_string()))
            .collect();

        for (mother, child) in &pairs {
            let reconciliation = Reconciler::new(&self.catalog, &self.base_url)
                .reconcile(child, mother)
                .await?;

            summary.pairs += 1;
            summary.staged += reconciliation.products.len();

            for product in &reconciliation.products {
                match self.commit(product, &session).await {
                    UpdateOutcome::Reported => summary.reported += 1,
                    UpdateOutcome::Updated => summary.updated += 1,
                    UpdateOutcome::Rejected | UpdateOutcome::Failed => summary.failed += 1,
                }
            }
        }

        Ok(summary)
    }

    /// Send one staged product. Failures are reported and never retried.
    pub async fn commit(&self, product: &Product, session: &Session) -> UpdateOutcome {
        if self.debug {
            println!("> TO CHECK Product {} : @ {}", product.code, product.weburl);
            return UpdateOutcome::Reported;
        }

        match self.catalog.update_product(product, session).await {
            Ok(true) => {
                println!("< UPDATED Product {} : @ {}", product.code, product.weburl);
                self.throttle.pause().await;
                UpdateOutcome::Updated
            }
            Ok(false) => {
                println!("< ERROR Product {} : @ {}", product.code, product.weburl);
                UpdateOutcome::Rejected
            }
            Err(e) => {
                tracing::error!("Update of product {} failed: {}", product.code, e);
                println!("< ERROR Product {} : @ {}", product.code, product.weburl);
                UpdateOutcome::Failed
            }
        }
    }
}
