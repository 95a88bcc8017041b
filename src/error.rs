use thiserror::Error;

/// Errors raised while parsing a free-text ingredient quantity
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The text does not start with a number
    #[error("Malformed quantity: '{raw}'")]
    MalformedQuantity { raw: String },

    /// The leading number is negative
    #[error("Negative quantity: '{raw}'")]
    NegativeQuantity { raw: String },
}

impl ParseError {
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::MalformedQuantity { .. } => "malformed_quantity",
            ParseError::NegativeQuantity { .. } => "negative_quantity",
        }
    }

    /// The original quantity text that failed to parse
    pub fn raw(&self) -> &str {
        match self {
            ParseError::MalformedQuantity { raw } | ParseError::NegativeQuantity { raw } => raw,
        }
    }
}

/// Client-input rejections produced by request validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// An ingredient quantity could not be parsed
    #[error("Invalid quantity for ingredient '{ingredient_name}': {cause}")]
    InvalidIngredientQuantity {
        ingredient_name: String,
        #[source]
        cause: ParseError,
    },

    /// The meal type is not one of the supported values
    #[error("Invalid meal type '{got}'. Must be one of {allowed:?}")]
    InvalidMealType {
        got: String,
        allowed: Vec<&'static str>,
    },

    /// An ingredient was submitted without a name
    #[error("Ingredient at position {position} has an empty name")]
    EmptyIngredientName { position: usize },

    /// A field holds a value outside its configured set
    #[error("Value '{got}' is not allowed for {field}. Must be one of {allowed:?}")]
    DisallowedValue {
        field: &'static str,
        got: String,
        allowed: Vec<String>,
    },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidIngredientQuantity { .. } => "invalid_ingredient_quantity",
            ValidationError::InvalidMealType { .. } => "invalid_meal_type",
            ValidationError::EmptyIngredientName { .. } => "empty_ingredient_name",
            ValidationError::DisallowedValue { .. } => "disallowed_value",
        }
    }
}

/// Failures while retrieving content from a single recipe source
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source answered with a non-success status code
    #[error("Failed to fetch {url}: HTTP {code}")]
    HttpStatus { url: String, code: u16 },

    /// The source answered with a content type we cannot parse
    #[error("Unsupported Content-Type from {url}: '{content_type}'")]
    UnsupportedContentType { url: String, content_type: String },

    /// The request never produced a usable response
    #[error("Failed to fetch {url}: {cause}")]
    Transport {
        url: String,
        #[source]
        cause: reqwest::Error,
    },
}

impl FetchError {
    pub fn code(&self) -> &'static str {
        match self {
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::UnsupportedContentType { .. } => "unsupported_content_type",
            FetchError::Transport { .. } => "transport",
        }
    }
}

/// Failures while turning fetched content into a recipe record
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

impl ExtractError {
    pub fn code(&self) -> &'static str {
        match self {
            ExtractError::InvalidJson(_) => "invalid_json",
            ExtractError::NotAnObject { .. } => "not_an_object",
        }
    }
}

/// Why a single candidate URL produced no recipe during aggregation
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The aggregation deadline passed before the source finished
    #[error("Cancelled: aggregation deadline reached")]
    Cancelled,

    /// The fetch task panicked or was aborted
    #[error("Fetch task failed: {0}")]
    Task(String),
}

impl SourceError {
    pub fn code(&self) -> &'static str {
        match self {
            SourceError::Fetch(e) => e.code(),
            SourceError::Extract(e) => e.code(),
            SourceError::Cancelled => "cancelled",
            SourceError::Task(_) => "task_failed",
        }
    }
}

/// Errors that can occur while setting up or running a recipe search
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The request was rejected
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Failed to build the HTTP client
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// A configured locator endpoint is not a valid URL
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RecipeError {
    pub fn code(&self) -> &'static str {
        match self {
            RecipeError::Validation(e) => e.code(),
            RecipeError::Client(_) => "client",
            RecipeError::Header(_) => "header",
            RecipeError::InvalidUrl { .. } => "invalid_url",
            RecipeError::Builder(_) => "builder",
            RecipeError::Config(_) => "config",
        }
    }
}
