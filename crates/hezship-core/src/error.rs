use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rate table {path}: {source}")]
    RateTableIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rate table: {0}")]
    RateTableParse(#[from] serde_yaml::Error),

    #[error("rate table validation failed: {0}")]
    Validation(String),
}

/// Failure to interpret a tier or zone name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown shipping tier: {0:?} (expected standard, express or same-day)")]
    UnknownTier(String),

    #[error("unknown zone: {0:?} (expected urban, peri-urban, rural or remote)")]
    UnknownZone(String),
}
