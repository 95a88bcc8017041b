use std::sync::Arc;
use std::time::Duration;

use crate::{
    EventReporter, LogReporter, RecipeAggregator, RecipeError, RecipeFetcher, RecipeSourceLocator,
};

/// Builder for configuring a [`RecipeAggregator`]
#[derive(Default)]
pub struct RecipeAggregatorBuilder {
    locator: Option<Arc<dyn RecipeSourceLocator>>,
    fetcher: Option<RecipeFetcher>,
    reporter: Option<Arc<dyn EventReporter>>,
    timeout: Option<Duration>,
    max_concurrent_fetches: Option<usize>,
    batch_timeout: Option<Duration>,
}

impl RecipeAggregatorBuilder {
    /// Set where candidate URLs come from (required)
    ///
    /// # Example
    /// ```
    /// use best_recipe::{RecipeAggregator, StaticLocator};
    ///
    /// let builder = RecipeAggregator::builder()
    ///     .locator(StaticLocator::new(["https://example.com/recipe/1"]));
    /// ```
    pub fn locator(self, locator: impl RecipeSourceLocator + 'static) -> Self {
        self.locator_arc(Arc::new(locator))
    }

    /// Set a shared locator
    pub fn locator_arc(mut self, locator: Arc<dyn RecipeSourceLocator>) -> Self {
        self.locator = Some(locator);
        self
    }

    /// Use a preconfigured fetcher instead of building one
    ///
    /// When set, [`timeout`](Self::timeout) is ignored.
    pub fn fetcher(mut self, fetcher: RecipeFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Set a timeout for each HTTP request
    ///
    /// # Example
    /// ```
    /// use best_recipe::{RecipeAggregator, StaticLocator};
    /// use std::time::Duration;
    ///
    /// let builder = RecipeAggregator::builder()
    ///     .locator(StaticLocator::default())
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Cap the number of fetches in flight at once (at least 1)
    pub fn max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = Some(limit);
        self
    }

    /// Set a deadline for a whole aggregation pass
    ///
    /// Sources still pending when it passes are cancelled and reported as failures.
    pub fn batch_timeout(mut self, duration: Duration) -> Self {
        self.batch_timeout = Some(duration);
        self
    }

    /// Set where per-source outcomes are reported (defaults to [`LogReporter`])
    pub fn reporter(mut self, reporter: Arc<dyn EventReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Build the aggregator
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - No locator was specified
    /// - The HTTP client could not be built
    pub fn build(self) -> Result<RecipeAggregator, RecipeError> {
        let locator = self.locator.ok_or_else(|| {
            RecipeError::Builder("No locator specified. Use .locator()".to_string())
        })?;

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => RecipeFetcher::new(self.timeout)?,
        };

        Ok(RecipeAggregator {
            locator,
            fetcher,
            reporter: self.reporter.unwrap_or_else(|| Arc::new(LogReporter)),
            max_concurrent_fetches: self.max_concurrent_fetches.unwrap_or(4).max(1),
            batch_timeout: self.batch_timeout,
        })
    }
}
