use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Scraping error: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build client: {0}")]
    BuildError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response status {status_code} for {url}")]
    ResponseError { status_code: u16, url: String },
}

/// Structural failures. Unlike fetch failures these abort the whole run:
/// a reachable page with an unexpected shape means the site layout
/// changed and every later extraction would emit garbage.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Tag not found: <{tag}>{filters}")]
    TagNotFound { tag: String, filters: String },

    #[error("Missing attribute {attr:?} on <{tag}>")]
    MissingAttribute { tag: String, attr: String },

    #[error("Selector error: {0}")]
    Selector(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Unexpected page structure: {0}")]
    Structure(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
