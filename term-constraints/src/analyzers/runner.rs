//! Sequential execution of a list of analyzers into an [`AnalyzerContext`].

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::state::{StateLoader, StatePersister};
use super::{Analyzer, AnalyzerContext, AnalyzerKey, Dataset, Metric, MetricValue};

/// Type alias for progress callback function.
pub type ProgressCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Object-safe view of an analyzer whose metric type has been erased.
#[async_trait]
trait ErasedAnalyzer: Send + Sync {
    fn key(&self) -> AnalyzerKey;

    async fn calculate_erased(
        &self,
        data: &Dataset,
        loader: Option<&dyn StateLoader>,
        persister: Option<&dyn StatePersister>,
    ) -> Metric<MetricValue>;
}

#[async_trait]
impl<A: Analyzer> ErasedAnalyzer for A {
    fn key(&self) -> AnalyzerKey {
        Analyzer::key(self)
    }

    async fn calculate_erased(
        &self,
        data: &Dataset,
        loader: Option<&dyn StateLoader>,
        persister: Option<&dyn StatePersister>,
    ) -> Metric<MetricValue> {
        self.calculate(data, loader, persister).await.into_erased()
    }
}

/// Runs analyzers one after another and collects their metrics.
///
/// Every analyzer contributes a metric, success or failure, so the
/// resulting context answers for each of them. Analyzers with equal keys
/// run once.
///
/// # Example
///
/// ```rust,ignore
/// use term_constraints::analyzers::{basic::*, AnalysisRunner, Dataset};
///
/// let runner = AnalysisRunner::new()
///     .add(SizeAnalyzer::new())
///     .add(CompletenessAnalyzer::new("user_id"))
///     .on_progress(|progress| println!("Analysis progress: {:.1}%", progress * 100.0));
///
/// let context = runner.run(&dataset).await;
/// println!("Computed {} metrics", context.len());
/// ```
#[derive(Default)]
pub struct AnalysisRunner {
    analyzers: Vec<Box<dyn ErasedAnalyzer>>,
    on_progress: Option<ProgressCallback>,
    state_loader: Option<Arc<dyn StateLoader>>,
    state_persister: Option<Arc<dyn StatePersister>>,
}

impl AnalysisRunner {
    /// Creates a new empty AnalysisRunner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an analyzer; an analyzer equal to one already added is ignored.
    #[allow(clippy::should_implement_trait)]
    pub fn add<A>(mut self, analyzer: A) -> Self
    where
        A: Analyzer + 'static,
    {
        let key = Analyzer::key(&analyzer);
        if self.analyzers.iter().any(|a| a.key() == key) {
            debug!(analyzer = %key, "Skipping duplicate analyzer");
            return self;
        }
        self.analyzers.push(Box::new(analyzer));
        self
    }

    /// Sets a progress callback that will be called during execution.
    ///
    /// The callback receives a float between 0.0 and 1.0 indicating progress.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    /// Merges every computed state with the one stored in `loader`.
    pub fn aggregate_with(mut self, loader: Arc<dyn StateLoader>) -> Self {
        self.state_loader = Some(loader);
        self
    }

    /// Saves every (merged) state to `persister`.
    pub fn save_states_with(mut self, persister: Arc<dyn StatePersister>) -> Self {
        self.state_persister = Some(persister);
        self
    }

    /// Returns the number of analyzers configured.
    pub fn analyzer_count(&self) -> usize {
        self.analyzers.len()
    }

    /// Executes all analyzers on the given dataset.
    #[instrument(skip(self, data), fields(analyzer_count = self.analyzers.len(), table = %data.table_name()))]
    pub async fn run(&self, data: &Dataset) -> AnalyzerContext {
        info!("Starting analysis with {} analyzers", self.analyzers.len());

        let mut context = AnalyzerContext::with_dataset(data.table_name());
        context.metadata_mut().record_start();

        let total = self.analyzers.len() as f64;
        let loader = self.state_loader.as_deref();
        let persister = self.state_persister.as_deref();

        for (idx, analyzer) in self.analyzers.iter().enumerate() {
            let key = analyzer.key();
            debug!(analyzer = %key, "Executing analyzer");

            let metric = analyzer.calculate_erased(data, loader, persister).await;
            context.insert_erased(key, metric);

            if let Some(ref callback) = self.on_progress {
                callback((idx + 1) as f64 / total);
            }
        }

        context.metadata_mut().record_end();

        if let Some(duration) = context.metadata().duration() {
            info!(
                "Analysis completed in {:.2}s",
                duration.num_milliseconds() as f64 / 1000.0
            );
        }

        context
    }
}
