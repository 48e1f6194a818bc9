use std::path::PathBuf;

use thiserror::Error;

/// Value-level validation failures raised by domain constructors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unparseable date '{value}'")]
    InvalidDate { value: String },

    #[error("value '{value}' is not a number")]
    InvalidNumber { value: String },

    #[error("value '{value}' must be finite")]
    NonFiniteValue { value: String },

    #[error("duplicate date {date}")]
    DuplicateDate { date: String },
}

/// Upstream request failed before a body could be interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{series}: upstream returned status {status} for {url}")]
    Status {
        series: String,
        status: u16,
        url: String,
    },

    #[error("{series}: transport error for {url}: {message}")]
    Transport {
        series: String,
        url: String,
        message: String,
    },
}

impl FetchError {
    pub fn series(&self) -> &str {
        match self {
            Self::Status { series, .. } | Self::Transport { series, .. } => series,
        }
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// Response body did not match the schema expected for its endpoint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{series}: response body is not valid JSON: {message}")]
    InvalidJson { series: String, message: String },

    #[error("{series}: response does not match the expected schema: {message}")]
    UnexpectedShape { series: String, message: String },

    #[error("{series}: record {index} is missing field '{field}'")]
    MissingField {
        series: String,
        index: usize,
        field: &'static str,
    },

    #[error("{series}: record {index}: {reason}")]
    InvalidRecord {
        series: String,
        index: usize,
        reason: ValidationError,
    },

    #[error("{series}: {reason}")]
    InvalidTable {
        series: String,
        reason: ValidationError,
    },
}

impl ParseError {
    pub(crate) fn from_json(series: &str, error: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match error.classify() {
            Category::Data => Self::UnexpectedShape {
                series: series.to_owned(),
                message: error.to_string(),
            },
            Category::Io | Category::Syntax | Category::Eof => Self::InvalidJson {
                series: series.to_owned(),
                message: error.to_string(),
            },
        }
    }

    pub fn series(&self) -> &str {
        match self {
            Self::InvalidJson { series, .. }
            | Self::UnexpectedShape { series, .. }
            | Self::MissingField { series, .. }
            | Self::InvalidRecord { series, .. }
            | Self::InvalidTable { series, .. } => series,
        }
    }
}

/// Writing a table to disk failed.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Top-level error for a download step. Nothing is retried; the caller aborts.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl PipelineError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Fetch(_) => 3,
            Self::Parse(_) => 4,
            Self::Output(_) => 10,
        }
    }
}
