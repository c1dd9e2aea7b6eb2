//! Batch orchestration
//!
//! One run walks `Idle -> Validating -> Loading -> [Resolving] -> Mutating
//! -> Reporting -> Done`. Only validation and loading can fail the run; from
//! the first remote call on, every per-item problem ends up in the report.

use super::aggregator::ReportAggregator;
use super::summary::log_summary;
use super::types::{BatchReport, ParsedUpdate, ResolvedUpdate, UnresolvedReference};
use crate::config::{PriceUnits, PricingMode, SyncConfig};
use crate::core::catalog::{
    CatalogClient, CatalogClientConfig, IdentifierResolver, OperationOutcome, PriceMutator,
};
use crate::core::limiter::ConcurrencyLimiter;
use crate::core::pricing::{format_minor_units, parse_price};
use crate::core::source::{CsvRecordSource, RawRecord, RecordSource};
use crate::utils::error::{Result, SyncError};
use futures::FutureExt;
use futures::future::join_all;
use serde_json::json;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Idle,
    Validating,
    Loading,
    Resolving,
    Mutating,
    Reporting,
    Done,
    Failed,
}

impl fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Loading => "loading",
            Self::Resolving => "resolving",
            Self::Mutating => "mutating",
            Self::Reporting => "reporting",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Pipeline strategy of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub mode: PricingMode,
    pub units: PriceUnits,
    pub concurrency: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            mode: PricingMode::default(),
            units: PriceUnits::default(),
            concurrency: crate::config::DEFAULT_RATE_LIMIT,
        }
    }
}

impl BatchOptions {
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            mode: config.mode,
            units: config.units,
            concurrency: config.rate_limit,
        }
    }

    pub fn with_mode(mut self, mode: PricingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_units(mut self, units: PriceUnits) -> Self {
        self.units = units;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Output of the loading phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedBatch {
    pub updates: Vec<ParsedUpdate>,
    pub skipped_rows: usize,
}

/// Drives one synchronization run
pub struct BatchOrchestrator {
    options: BatchOptions,
    config: Option<SyncConfig>,
    source: Arc<dyn RecordSource>,
    resolver: Option<Arc<dyn IdentifierResolver>>,
    mutator: Arc<dyn PriceMutator>,
    limiter: Arc<ConcurrencyLimiter>,
    phase: BatchPhase,
}

impl BatchOrchestrator {
    pub fn new(
        options: BatchOptions,
        source: impl RecordSource + 'static,
        mutator: Arc<dyn PriceMutator>,
    ) -> Self {
        Self {
            limiter: Arc::new(ConcurrencyLimiter::new(options.concurrency)),
            options,
            config: None,
            source: Arc::new(source),
            resolver: None,
            mutator,
            phase: BatchPhase::Idle,
        }
    }

    /// Wire the CSV source and the catalog client described by `config`
    pub fn from_config(config: SyncConfig) -> Result<Self> {
        config.check()?;

        let client = Arc::new(CatalogClient::new(CatalogClientConfig::from_sync_config(
            &config,
        ))?);
        let source = CsvRecordSource::new(config.csv_file_path.clone());
        let orchestrator = Self::new(BatchOptions::from_config(&config), source, client.clone())
            .with_config(config);

        Ok(match orchestrator.options.mode {
            PricingMode::ReferenceLookup => orchestrator.with_resolver(client),
            PricingMode::Direct => orchestrator,
        })
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn IdentifierResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Configuration to re-check during the validating phase
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Share a limiter with other work
    pub fn with_limiter(mut self, limiter: Arc<ConcurrencyLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    pub fn limiter(&self) -> &ConcurrencyLimiter {
        &self.limiter
    }

    /// Execute the run
    ///
    /// Errors only come from validation or loading, before any remote call.
    pub async fn run(&mut self) -> Result<BatchReport> {
        let aggregator = ReportAggregator::new();
        info!(
            run_id = %aggregator.run_id(),
            mode = ?self.options.mode,
            concurrency = self.limiter.capacity(),
            "Starting price update run"
        );

        self.transition(BatchPhase::Validating);
        if let Err(e) = self.validate() {
            return Err(self.fail(e));
        }

        self.transition(BatchPhase::Loading);
        let loaded = match self.load().await {
            Ok(loaded) => loaded,
            Err(e) => return Err(self.fail(e)),
        };
        aggregator.record_skipped(loaded.skipped_rows);

        if loaded.updates.is_empty() {
            warn!("No valid products found in {}", self.source.describe());
            return Ok(self.report(aggregator));
        }

        let targets = match self.options.mode {
            PricingMode::Direct => loaded.updates.into_iter().map(ResolvedUpdate::direct).collect(),
            PricingMode::ReferenceLookup => {
                self.transition(BatchPhase::Resolving);
                self.resolve_all(loaded.updates, &aggregator).await
            }
        };

        self.transition(BatchPhase::Mutating);
        info!(
            "Updating {} prices with at most {} concurrent requests",
            targets.len(),
            self.limiter.capacity()
        );
        self.mutate_all(targets, &aggregator).await;

        Ok(self.report(aggregator))
    }

    fn validate(&self) -> Result<()> {
        if let Some(config) = &self.config {
            config.check()?;
        }
        if self.options.mode == PricingMode::ReferenceLookup && self.resolver.is_none() {
            return Err(SyncError::config(
                "Reference lookup mode requires an identifier resolver",
            ));
        }
        self.source.check_available()
    }

    /// Read and parse every row; unusable rows are counted, not failed
    ///
    /// The read runs on the blocking pool so large files do not stall the
    /// runtime.
    pub async fn load(&self) -> Result<LoadedBatch> {
        let source = Arc::clone(&self.source);
        let records = tokio::task::spawn_blocking(move || source.read_records())
            .await
            .map_err(|e| SyncError::internal(format!("record source task failed: {}", e)))??;
        Ok(self.parse_records(records))
    }

    /// Turn raw rows into updates according to the configured price units
    pub fn parse_records(&self, records: Vec<RawRecord>) -> LoadedBatch {
        let mut loaded = LoadedBatch::default();

        for record in records {
            let reference_code = record.reference_code.trim();
            let amount = parse_price(&record.price_text, self.options.units);
            match amount {
                Some(amount) if !reference_code.is_empty() => loaded.updates.push(ParsedUpdate {
                    reference_code: reference_code.to_string(),
                    amount_minor_units: amount,
                }),
                _ => {
                    debug!(
                        reference_code,
                        price_text = %record.price_text,
                        "Skipping row without a usable identifier or price"
                    );
                    loaded.skipped_rows += 1;
                }
            }
        }

        info!(
            "Found {} products to update ({} rows skipped)",
            loaded.updates.len(),
            loaded.skipped_rows
        );
        loaded
    }

    async fn resolve_all(
        &self,
        updates: Vec<ParsedUpdate>,
        aggregator: &ReportAggregator,
    ) -> Vec<ResolvedUpdate> {
        let Some(resolver) = self.resolver.as_deref() else {
            return Vec::new();
        };
        let limiter = self.limiter.as_ref();

        let tasks = updates.into_iter().map(|update| async move {
            let lookup = AssertUnwindSafe(limiter.run(resolver.resolve(&update.reference_code)))
                .catch_unwind()
                .await;
            match lookup {
                Ok(Ok(Ok(Some(item_id)))) => Some(ResolvedUpdate::resolved(update, item_id)),
                Ok(Ok(Ok(None))) => {
                    warn!("No catalog item for reference code {}", update.reference_code);
                    aggregator.record_unresolved(UnresolvedReference::not_found(&update));
                    None
                }
                Ok(Ok(Err(e))) => {
                    warn!("SKU lookup for {} failed: {}", update.reference_code, e);
                    aggregator.record_unresolved(UnresolvedReference::with_reason(
                        &update,
                        format!("lookup failed: {}", e),
                    ));
                    None
                }
                Ok(Err(closed)) => {
                    aggregator.record_unresolved(UnresolvedReference::with_reason(
                        &update,
                        closed.to_string(),
                    ));
                    None
                }
                Err(_) => {
                    error!("Lookup task for {} panicked", update.reference_code);
                    aggregator.record_unresolved(UnresolvedReference::with_reason(
                        &update,
                        "lookup task panicked",
                    ));
                    None
                }
            }
        });

        let resolved: Vec<ResolvedUpdate> = join_all(tasks).await.into_iter().flatten().collect();
        info!("Resolved {} reference codes", resolved.len());
        resolved
    }

    async fn mutate_all(&self, targets: Vec<ResolvedUpdate>, aggregator: &ReportAggregator) {
        let total = targets.len();
        let limiter = self.limiter.as_ref();
        let mutator = self.mutator.as_ref();
        let keep_reference = self.options.mode == PricingMode::ReferenceLookup;

        let tasks = targets.into_iter().enumerate().map(|(index, target)| async move {
            let attempt = AssertUnwindSafe(
                limiter.run(mutator.update_price(&target.item_id, target.amount_minor_units)),
            )
            .catch_unwind()
            .await;

            let mut outcome = match attempt {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(closed)) => OperationOutcome::failure(
                    target.item_id.clone(),
                    target.amount_minor_units,
                    None,
                    json!(closed.to_string()),
                ),
                Err(_) => OperationOutcome::failure(
                    target.item_id.clone(),
                    target.amount_minor_units,
                    None,
                    json!("update task panicked"),
                ),
            };
            if keep_reference {
                outcome = outcome.with_reference_code(target.reference_code);
            }

            if outcome.succeeded {
                info!(
                    "[{}/{}] Updated {}: {}",
                    index + 1,
                    total,
                    outcome.item_id,
                    format_minor_units(outcome.amount_minor_units)
                );
            } else {
                warn!(
                    "[{}/{}] Failed {}: {}",
                    index + 1,
                    total,
                    outcome.item_id,
                    outcome.error_text()
                );
            }
            aggregator.record(outcome);
        });

        join_all(tasks).await;
        debug!("All {} update tasks settled", aggregator.recorded());
    }

    fn report(&mut self, aggregator: ReportAggregator) -> BatchReport {
        self.transition(BatchPhase::Reporting);
        let report = aggregator.finalize();
        log_summary(&report);
        self.transition(BatchPhase::Done);
        report
    }

    fn fail(&mut self, err: SyncError) -> SyncError {
        error!("Run failed while {}: {}", self.phase, err);
        self.transition(BatchPhase::Failed);
        err
    }

    fn transition(&mut self, next: BatchPhase) {
        debug!(from = %self.phase, to = %next, "Batch phase transition");
        self.phase = next;
    }
}
