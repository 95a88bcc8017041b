use crate::error::{FetchError, RecipeError};
use log::debug;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// JSON preferred, HTML accepted
pub const ACCEPT_PREFERENCE: &str = "application/json, text/html;q=0.9";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; BestRecipeBot/1.0)";

/// The content families we know how to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Html,
}

impl ContentKind {
    /// Classify a `Content-Type` header value, ignoring parameters and case
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/json" => Some(ContentKind::Json),
            "text/html" => Some(ContentKind::Html),
            _ => None,
        }
    }
}

/// A successful response body tagged with its content family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContent {
    pub kind: ContentKind,
    pub body: String,
}

impl RawContent {
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Json,
            body: body.into(),
        }
    }

    pub fn html(body: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Html,
            body: body.into(),
        }
    }
}

/// Issues one GET per recipe URL. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RecipeFetcher {
    client: Client,
}

impl RecipeFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, RecipeError> {
        Self::with_user_agent(timeout, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(timeout: Option<Duration>, user_agent: &str) -> Result<Self, RecipeError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(HeaderValue::from_str(user_agent)?)
            .build()?;

        Ok(Self { client })
    }

    /// Build a fetcher around an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, url: &str) -> Result<RawContent, FetchError> {
        let transport = |cause| FetchError::Transport {
            url: url.to_string(),
            cause,
        };

        let response = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_PREFERENCE)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                code: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let kind = ContentKind::from_content_type(&content_type).ok_or_else(|| {
            FetchError::UnsupportedContentType {
                url: url.to_string(),
                content_type: content_type.clone(),
            }
        })?;

        let body = response.text().await.map_err(transport)?;
        debug!("Fetched {} bytes of {:?} from {}", body.len(), kind, url);

        Ok(RawContent { kind, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_from_content_type() {
        assert_eq!(
            ContentKind::from_content_type("application/json"),
            Some(ContentKind::Json)
        );
        assert_eq!(
            ContentKind::from_content_type("application/json; charset=utf-8"),
            Some(ContentKind::Json)
        );
        assert_eq!(
            ContentKind::from_content_type("Text/HTML;charset=UTF-8"),
            Some(ContentKind::Html)
        );
        assert_eq!(ContentKind::from_content_type("text/plain"), None);
        assert_eq!(ContentKind::from_content_type("application/xml"), None);
        assert_eq!(ContentKind::from_content_type(""), None);
    }
}
