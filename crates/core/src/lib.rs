pub mod calculators;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::Utc;
use uuid::Uuid;

use errors::CoreError;
use models::insurance::{Insurance, InsuranceInput};
use models::investment::{Investment, InvestmentInput};
use models::loan::{Loan, LoanInput};
use models::portfolio::Portfolio;
use models::settings::Settings;
use services::analytics_service::AnalyticsService;
use services::portfolio_service::PortfolioService;
use storage::manager::StorageManager;
use storage::store::KeyValueStore;
#[cfg(not(target_arch = "wasm32"))]
use storage::store::FileStore;

/// Main entry point for the portfolio tracker.
///
/// Every mutation runs load → mutate → recompute → save against the store,
/// so the stored document is always the source of truth and its derived
/// views always match its records.
#[must_use]
pub struct FinanceTracker<S: KeyValueStore> {
    store: S,
    settings: Settings,
    portfolio_service: PortfolioService,
    analytics_service: AnalyticsService,
}

impl<S: KeyValueStore> std::fmt::Debug for FinanceTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("storage_key", &self.settings.storage_key)
            .finish()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FinanceTracker<FileStore> {
    /// Open a file-backed tracker in `settings.data_dir`.
    pub fn open(settings: Settings) -> Result<Self, CoreError> {
        let dir = settings
            .data_dir
            .clone()
            .ok_or_else(|| CoreError::Config("dataDir is required for a file-backed tracker".into()))?;
        let store = FileStore::open(dir)?;
        Self::with_settings(store, settings)
    }
}

impl<S: KeyValueStore> FinanceTracker<S> {
    /// Tracker over `store` with default settings.
    pub fn new(store: S) -> Self {
        Self::build(store, Settings::default())
    }

    pub fn with_settings(store: S, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(store, settings))
    }

    fn build(store: S, settings: Settings) -> Self {
        Self {
            store,
            settings,
            portfolio_service: PortfolioService::new(),
            analytics_service: AnalyticsService::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ── Reading ─────────────────────────────────────────────────────

    /// The stored portfolio, or `None` if nothing is stored or the stored
    /// document cannot be read (logged).
    pub fn get_portfolio(&self) -> Option<Portfolio> {
        StorageManager::load_or_absent(&self.store, &self.settings.storage_key)
    }

    /// The stored portfolio, or an empty one. Nothing is written.
    pub fn get_or_create(&self) -> Portfolio {
        self.get_portfolio()
            .unwrap_or_else(|| Portfolio::empty(Utc::now()))
    }

    pub fn get_investment(&self, id: Uuid) -> Option<Investment> {
        self.get_portfolio()?
            .investments
            .into_iter()
            .find(|i| i.id == id)
    }

    pub fn get_insurance(&self, id: Uuid) -> Option<Insurance> {
        self.get_portfolio()?
            .insurance
            .into_iter()
            .find(|p| p.id == id)
    }

    pub fn get_loan(&self, id: Uuid) -> Option<Loan> {
        self.get_portfolio()?.loans.into_iter().find(|l| l.id == id)
    }

    // ── Investments ─────────────────────────────────────────────────

    pub fn add_investment(&mut self, input: InvestmentInput) -> Result<Investment, CoreError> {
        self.mutate("add investment", |svc, p, now| svc.add_investment(p, input, now))
    }

    pub fn update_investment(
        &mut self,
        id: Uuid,
        input: InvestmentInput,
    ) -> Result<Investment, CoreError> {
        self.mutate("update investment", |svc, p, now| {
            svc.update_investment(p, id, input, now)
        })
    }

    pub fn delete_investment(&mut self, id: Uuid) -> Result<Investment, CoreError> {
        self.mutate("delete investment", |svc, p, _| svc.delete_investment(p, id))
    }

    // ── Insurance ───────────────────────────────────────────────────

    pub fn add_insurance(&mut self, input: InsuranceInput) -> Result<Insurance, CoreError> {
        self.mutate("add insurance", |svc, p, now| svc.add_insurance(p, input, now))
    }

    pub fn update_insurance(
        &mut self,
        id: Uuid,
        input: InsuranceInput,
    ) -> Result<Insurance, CoreError> {
        self.mutate("update insurance", |svc, p, now| {
            svc.update_insurance(p, id, input, now)
        })
    }

    pub fn delete_insurance(&mut self, id: Uuid) -> Result<Insurance, CoreError> {
        self.mutate("delete insurance", |svc, p, _| svc.delete_insurance(p, id))
    }

    // ── Loans ───────────────────────────────────────────────────────

    pub fn add_loan(&mut self, input: LoanInput) -> Result<Loan, CoreError> {
        self.mutate("add loan", |svc, p, now| svc.add_loan(p, input, now))
    }

    pub fn update_loan(&mut self, id: Uuid, input: LoanInput) -> Result<Loan, CoreError> {
        self.mutate("update loan", |svc, p, now| svc.update_loan(p, id, input, now))
    }

    pub fn delete_loan(&mut self, id: Uuid) -> Result<Loan, CoreError> {
        self.mutate("delete loan", |svc, p, _| svc.delete_loan(p, id))
    }

    // ── Whole document ──────────────────────────────────────────────

    /// Remove the stored portfolio entirely.
    pub fn clear(&mut self) -> Result<(), CoreError> {
        log::debug!("clearing portfolio under {:?}", self.settings.storage_key);
        self.store
            .remove(&self.settings.storage_key)
            .inspect_err(|e| log::error!("Failed to clear portfolio: {e}"))
    }

    /// Encrypted, portable copy of the current portfolio.
    pub fn export_backup(&self, password: &str) -> Result<Vec<u8>, CoreError> {
        let portfolio = self.get_or_create();
        StorageManager::export_backup(&portfolio, password, &self.settings.backup_kdf)
    }

    /// Replace the stored portfolio with the contents of a backup.
    /// Derived views are recomputed before saving.
    pub fn import_backup(&mut self, data: &[u8], password: &str) -> Result<Portfolio, CoreError> {
        let mut portfolio = StorageManager::import_backup(data, password)?;
        self.analytics_service.recompute(&mut portfolio, Utc::now());
        self.persist(&portfolio)?;
        log::debug!("imported backup with {} records", portfolio.record_count());
        Ok(portfolio)
    }

    /// Shared read-modify-write cycle for every record mutation.
    fn mutate<T>(
        &mut self,
        action: &str,
        op: impl FnOnce(&PortfolioService, &mut Portfolio, chrono::DateTime<Utc>) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let now = Utc::now();
        let mut portfolio = self
            .get_portfolio()
            .unwrap_or_else(|| Portfolio::empty(now));

        let out = op(&self.portfolio_service, &mut portfolio, now)?;
        self.analytics_service.recompute(&mut portfolio, now);
        self.persist(&portfolio)?;

        log::debug!("{action}: portfolio now holds {} records", portfolio.record_count());
        Ok(out)
    }

    fn persist(&mut self, portfolio: &Portfolio) -> Result<(), CoreError> {
        StorageManager::save(&mut self.store, &self.settings.storage_key, portfolio)
            .inspect_err(|e| log::error!("Failed to save portfolio: {e}"))
    }
}
