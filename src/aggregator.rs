//! Fan-out retrieval: locate candidate URLs, then fetch and parse each one.
//!
//! One task is spawned per URL into a [`JoinSet`] and a semaphore bounds how
//! many fetches run at once. Each task carries its index, so results keep the
//! locator's order whatever order the fetches finish in. A failing URL is
//! reported and skipped; it never aborts the pass.

use crate::builder::RecipeAggregatorBuilder;
use crate::config::AppConfig;
use crate::error::{RecipeError, SourceError};
use crate::extractors::parse_recipe;
use crate::fetcher::RecipeFetcher;
use crate::locator::{locator_from_config, RecipeSourceLocator};
use crate::model::RecipeRecord;
use crate::report::EventReporter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};

/// A candidate URL that produced no recipe, and why
#[derive(Debug)]
pub struct SourceFailure {
    pub url: String,
    pub error: SourceError,
}

/// Everything one aggregation pass produced
#[derive(Debug, Default)]
pub struct Aggregation {
    /// Parsed recipes in locator order
    pub recipes: Vec<RecipeRecord>,
    /// Failed URLs in locator order
    pub failures: Vec<SourceFailure>,
}

pub struct RecipeAggregator {
    pub(crate) locator: Arc<dyn RecipeSourceLocator>,
    pub(crate) fetcher: RecipeFetcher,
    pub(crate) reporter: Arc<dyn EventReporter>,
    pub(crate) max_concurrent_fetches: usize,
    pub(crate) batch_timeout: Option<Duration>,
}

impl RecipeAggregator {
    pub fn builder() -> RecipeAggregatorBuilder {
        RecipeAggregatorBuilder::default()
    }

    /// Wire locator, fetcher and limits from loaded configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, RecipeError> {
        let fetcher =
            RecipeFetcher::with_user_agent(Some(config.fetch.timeout()), &config.fetch.user_agent)?;

        let mut builder = Self::builder()
            .locator_arc(Arc::from(locator_from_config(&config.locator)?))
            .fetcher(fetcher)
            .max_concurrent_fetches(config.aggregator.max_concurrent_fetches);
        if let Some(deadline) = config.aggregator.batch_timeout() {
            builder = builder.batch_timeout(deadline);
        }
        builder.build()
    }

    /// Recipes for the given ingredients, in locator order.
    ///
    /// Never fails: URLs that cannot be fetched or parsed are skipped, and an
    /// empty result means nothing usable was found.
    pub async fn aggregate(&self, ingredient_names: &[String]) -> Vec<RecipeRecord> {
        self.collect(ingredient_names).await.recipes
    }

    /// Like [`aggregate`](Self::aggregate), but also returns the per-URL failures
    pub async fn collect(&self, ingredient_names: &[String]) -> Aggregation {
        let urls = self.locator.locate(ingredient_names).await;
        if urls.is_empty() {
            self.reporter.info("No candidate recipe URLs located");
            return Aggregation::default();
        }
        self.reporter
            .info(&format!("Fetching {} candidate recipe URLs", urls.len()));

        let permits = Arc::new(Semaphore::new(self.max_concurrent_fetches.max(1)));
        // Dropping the set aborts every task still running
        let mut tasks = JoinSet::new();
        for (index, url) in urls.iter().enumerate() {
            let fetch = fetch_and_parse(self.fetcher.clone(), Arc::clone(&permits), url.clone());
            tasks.spawn(async move { (index, fetch.await) });
        }

        let deadline = self.batch_timeout.map(|limit| Instant::now() + limit);
        let mut outcomes: Vec<Option<Result<RecipeRecord, SourceError>>> =
            urls.iter().map(|_| None).collect();
        let mut timed_out = false;
        let mut task_failure = None;

        loop {
            let next = match deadline {
                Some(deadline) => match timeout_at(deadline, tasks.join_next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        tasks.abort_all();
                        timed_out = true;
                        break;
                    }
                },
                None => tasks.join_next().await,
            };

            match next {
                Some(Ok((index, outcome))) => outcomes[index] = Some(outcome),
                Some(Err(e)) => task_failure = Some(e.to_string()),
                None => break,
            }
        }

        let mut aggregation = Aggregation::default();
        for (url, outcome) in urls.into_iter().zip(outcomes) {
            let outcome = outcome.unwrap_or_else(|| {
                Err(if timed_out {
                    SourceError::Cancelled
                } else {
                    SourceError::Task(
                        task_failure
                            .clone()
                            .unwrap_or_else(|| "fetch task ended without a result".to_string()),
                    )
                })
            });

            match outcome {
                Ok(recipe) => aggregation.recipes.push(recipe),
                Err(error) => {
                    self.reporter
                        .warn(&format!("Skipping {} ({}): {}", url, error.code(), error));
                    aggregation.failures.push(SourceFailure { url, error });
                }
            }
        }

        self.reporter.info(&format!(
            "Collected {} recipes, {} sources failed",
            aggregation.recipes.len(),
            aggregation.failures.len()
        ));
        aggregation
    }
}

async fn fetch_and_parse(
    fetcher: RecipeFetcher,
    permits: Arc<Semaphore>,
    url: String,
) -> Result<RecipeRecord, SourceError> {
    let _permit = permits
        .acquire_owned()
        .await
        .map_err(|e| SourceError::Task(e.to_string()))?;
    let content = fetcher.fetch(&url).await?;
    Ok(parse_recipe(&content, &url)?)
}
