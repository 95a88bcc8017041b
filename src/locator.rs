//! Candidate recipe URL discovery.
//!
//! How candidates are ranked is up to each [`RecipeSourceLocator`]. Every
//! implementation returns an empty list for an empty ingredient list and never
//! yields the same URL twice.

use crate::config::LocatorConfig;
use crate::error::RecipeError;
use async_trait::async_trait;
use log::debug;
use reqwest::Url;

#[async_trait]
pub trait RecipeSourceLocator: Send + Sync {
    /// Ordered, deduplicated candidate URLs for the given ingredients
    async fn locate(&self, ingredient_names: &[String]) -> Vec<String>;
}

/// Drop repeated entries, keeping the first occurrence of each
pub fn dedup_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// Returns the same candidate list for any non-empty ingredient list
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    candidates: Vec<String>,
}

impl StaticLocator {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: dedup_preserving_order(candidates.into_iter().map(Into::into)),
        }
    }
}

#[async_trait]
impl RecipeSourceLocator for StaticLocator {
    async fn locate(&self, ingredient_names: &[String]) -> Vec<String> {
        if ingredient_names.is_empty() {
            return Vec::new();
        }
        self.candidates.clone()
    }
}

/// Builds one search URL per endpoint, passing the ingredients as a query parameter
#[derive(Debug, Clone)]
pub struct QueryLocator {
    endpoints: Vec<Url>,
    param: String,
}

impl QueryLocator {
    pub fn new<I, S>(endpoints: I, param: impl Into<String>) -> Result<Self, RecipeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let endpoints = endpoints
            .into_iter()
            .map(|endpoint| {
                let endpoint = endpoint.as_ref();
                Url::parse(endpoint).map_err(|e| RecipeError::InvalidUrl {
                    url: endpoint.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            endpoints,
            param: param.into(),
        })
    }

    fn query_value(ingredient_names: &[String]) -> String {
        dedup_preserving_order(
            ingredient_names
                .iter()
                .map(|name| name.trim().to_lowercase())
                .filter(|name| !name.is_empty()),
        )
        .join(",")
    }
}

#[async_trait]
impl RecipeSourceLocator for QueryLocator {
    async fn locate(&self, ingredient_names: &[String]) -> Vec<String> {
        let value = Self::query_value(ingredient_names);
        if value.is_empty() {
            return Vec::new();
        }

        let urls = self.endpoints.iter().map(|endpoint| {
            let mut url = endpoint.clone();
            url.query_pairs_mut().append_pair(&self.param, &value);
            url.to_string()
        });
        let urls = dedup_preserving_order(urls);
        debug!("Located {} candidate URLs for '{}'", urls.len(), value);
        urls
    }
}

/// Pick the locator described by the configuration
pub fn locator_from_config(
    config: &LocatorConfig,
) -> Result<Box<dyn RecipeSourceLocator>, RecipeError> {
    if config.endpoints.is_empty() {
        Ok(Box::new(StaticLocator::new(config.candidates.iter().cloned())))
    } else {
        Ok(Box::new(QueryLocator::new(
            &config.endpoints,
            config.query_param.clone(),
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dedup_preserving_order() {
        let items = names(&["b", "a", "b", "c", "a"]);
        assert_eq!(dedup_preserving_order(items), names(&["b", "a", "c"]));
    }

    #[tokio::test]
    async fn test_static_locator_empty_ingredients() {
        let locator = StaticLocator::new(["https://example.com/recipe/1"]);
        assert!(locator.locate(&[]).await.is_empty());
        assert_eq!(
            locator.locate(&names(&["tomato"])).await,
            names(&["https://example.com/recipe/1"])
        );
    }

    #[tokio::test]
    async fn test_static_locator_dedups_candidates() {
        let locator = StaticLocator::new(["https://a.test/1", "https://a.test/2", "https://a.test/1"]);
        assert_eq!(
            locator.locate(&names(&["egg"])).await,
            names(&["https://a.test/1", "https://a.test/2"])
        );
    }

    #[tokio::test]
    async fn test_query_locator_builds_search_urls() {
        let locator = QueryLocator::new(
            ["https://search.test/recipes", "https://other.test/find?lang=en"],
            "ingredients",
        )
        .unwrap();

        let urls = locator
            .locate(&names(&["Tomato", " garlic ", "tomato", ""]))
            .await;
        assert_eq!(
            urls,
            names(&[
                "https://search.test/recipes?ingredients=tomato%2Cgarlic",
                "https://other.test/find?lang=en&ingredients=tomato%2Cgarlic",
            ])
        );
    }

    #[tokio::test]
    async fn test_query_locator_blank_names_yield_nothing() {
        let locator = QueryLocator::new(["https://search.test/recipes"], "q").unwrap();
        assert!(locator.locate(&names(&["  "])).await.is_empty());
        assert!(locator.locate(&[]).await.is_empty());
    }

    #[test]
    fn test_query_locator_rejects_invalid_endpoint() {
        let err = QueryLocator::new(["not a url"], "q").unwrap_err();
        assert_eq!(err.code(), "invalid_url");
    }

    #[tokio::test]
    async fn test_locator_from_config_prefers_endpoints() {
        let config = LocatorConfig {
            endpoints: vec!["https://search.test/recipes".to_string()],
            query_param: "i".to_string(),
            candidates: vec!["https://fixed.test/1".to_string()],
        };
        let locator = locator_from_config(&config).unwrap();
        assert_eq!(
            locator.locate(&names(&["rice"])).await,
            names(&["https://search.test/recipes?i=rice"])
        );
    }
}
