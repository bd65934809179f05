use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("required table {table} missing at {path}")]
    TableMissing { table: &'static str, path: String },

    #[error("unknown incident: {0}")]
    UnknownIncident(String),

    #[error("incident {0} is resolved; only unresolved incidents can be acted on")]
    IncidentResolved(String),

    #[error("No unresolved incidents in the dataset.")]
    NoUnresolvedIncidents,

    #[error("alert rejected: {0}")]
    AlertRejected(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
