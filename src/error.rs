use thiserror::Error;

/// Rejected plant definition or settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("plant '{0}' has a blank axiom")]
    BlankAxiom(String),

    #[error("plant '{plant}': {field} must be positive (got {value})")]
    NonPositive {
        plant: String,
        field: &'static str,
        value: f32,
    },

    #[error("plant '{0}' must run at least one iteration")]
    NoIterations(String),

    #[error("plant '{plant}': rule for '{symbol}' has no alternatives")]
    EmptyRule { plant: String, symbol: char },

    #[error("invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("unknown plant preset: {0}")]
    UnknownPreset(String),

    #[error("settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Json(#[from] serde_json::Error),
}
