use std::path::PathBuf;

use thiserror::Error;

use crate::types::Variable;

/// Feil ved lasting og oversetting av rådata.
/// Manglende filer er IKKE feil – de gir `Ok(None)` fra repository.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O-feil for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ugyldig JSON-syntaks. `line` er satt for NDJSON-filer.
    #[error("ugyldig JSON i {path}{}: {source}", .line.map(|l| format!(" (linje {l})")).unwrap_or_default())]
    Json {
        path: PathBuf,
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },

    /// Gyldig JSON med feil form (mangler `type`, `data` er ikke en liste, ...).
    #[error("schema-feil i {path} ved {location}: {message}")]
    Schema {
        path: PathBuf,
        location: String,
        message: String,
    },

    #[error("ugyldig start_date {value:?}")]
    StartDate { value: String },

    /// Parallelle stream-lister med ulik lengde.
    #[error("stream {stream:?} har {found} verdier, forventet {expected}")]
    LengthMismatch {
        stream: String,
        expected: usize,
        found: usize,
    },

    #[error("stream-data mangler `time`-stream")]
    MissingTimeStream,

    #[error("ugyldig verdi i stream {stream:?} på indeks {index}: {message}")]
    InvalidValue {
        stream: String,
        index: usize,
        message: String,
    },

    /// Brudd på Timeseries-invariantene (alle feil samlet).
    #[error("valideringsfeil:\n    * {}", .0.join("\n    * "))]
    Validation(Vec<String>),
}

/// Feil fra metrikkberegning (NGP/TSS).
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("for lite data: {0}")]
    InsufficientData(String),

    #[error("timeseries mangler variabel {0}")]
    MissingVariable(Variable),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}
