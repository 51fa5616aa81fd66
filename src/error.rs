use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("No element matching '{selector}' found in document")]
    NotFound { selector: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Could not parse {field} from '{raw}'")]
    Parse { field: String, raw: String },

    #[error("The {table} table has no team rows")]
    EmptyTable { table: &'static str },

    #[error("Team {abbreviation} is missing from the {table} table")]
    MissingRow {
        table: &'static str,
        abbreviation: String,
    },

    #[error("No conference found for {abbreviation} in the {season} season")]
    UnresolvedConference { abbreviation: String, season: u16 },

    #[error("Unknown team: {0}")]
    UnknownTeam(String),
}

impl ScraperError {
    /// True for lookup failures on an already built collection. These never
    /// invalidate the collection itself.
    pub fn is_value_error(&self) -> bool {
        matches!(self, ScraperError::UnknownTeam(_))
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
